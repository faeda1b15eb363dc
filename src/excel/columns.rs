//! Column letter ↔ index conversion

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
pub fn index_to_letter(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// Convert a column letter to its index (A→0, Z→25, AA→26).
///
/// Returns `None` for anything that is not one to three ASCII letters.
pub fn letter_to_index(letter: &str) -> Option<usize> {
    let letter = letter.trim();
    if letter.is_empty() || letter.len() > 3 || !letter.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut index = 0usize;
    for c in letter.chars() {
        index = index * 26 + (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
    }
    Some(index - 1)
}
