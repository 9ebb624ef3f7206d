//! File name normalization.
//!
//! Cyrillic letters are transliterated to Latin using a fixed table, then every
//! character that is not an ASCII letter, digit, `.` or `_` is folded to `_`.
//!
//! # Examples
//!
//! ```
//! use clean_folder::transliterate::normalize;
//!
//! assert_eq!(normalize("Привет"), "Privet");
//! assert_eq!(normalize("мой отчёт (1)"), "moy_otchet__1_");
//! assert_eq!(normalize("already_clean.txt"), "already_clean.txt");
//! ```

/// Returns the Latin replacement for a Cyrillic letter, or `None` for any other character.
///
/// "ъ" and "ь" map to an empty string and vanish from the output.
pub fn transliterate_char(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' | 'Ё' => "E",
        'Ж' => "ZH",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "KH",
        'Ц' => "TS",
        'Ч' => "CH",
        'Ш' => "SH",
        'Щ' => "SHCH",
        'Ъ' | 'Ь' => "",
        'Ы' => "Y",
        'Э' => "E",
        'Ю' => "YU",
        'Я' => "YA",
        _ => return None,
    };
    Some(latin)
}

/// Returns true for characters that survive sanitization unchanged.
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

/// Transliterates and sanitizes a file name (or any part of one).
///
/// The result only contains ASCII alphanumerics, `.` and `_`, so applying
/// `normalize` a second time returns the same string.
pub fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for c in name.chars() {
        match transliterate_char(c) {
            Some(latin) => normalized.push_str(latin),
            None if is_kept(c) => normalized.push(c),
            None => normalized.push('_'),
        }
    }
    normalized
}
