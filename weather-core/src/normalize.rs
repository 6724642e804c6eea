//! Name normalization for upstream queries.
//!
//! The MGM endpoints match `il` / `ilce` parameters against a plain-Latin,
//! title-cased spelling ("Nigde", "Canakkale"), so user input such as
//! "NİĞDE" or "çanakkale" has to be folded before it is sent.
//!
//! Also holds the Turkish alphabetical order used to sort place names for
//! display.

use std::cmp::Ordering;

use crate::error::WeatherError;

/// Turkish letters folded to their closest plain-Latin lowercase form.
const DIACRITICS: [(char, char); 6] = [
    ('ı', 'i'),
    ('ğ', 'g'),
    ('ş', 's'),
    ('ç', 'c'),
    ('ü', 'u'),
    ('ö', 'o'),
];

fn fold(c: char) -> char {
    DIACRITICS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// The Turkish alphabet in dictionary order.
const ALPHABET: [char; 29] = [
    'a', 'b', 'c', 'ç', 'd', 'e', 'f', 'g', 'ğ', 'h', 'ı', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'ö', 'p', 'r', 's', 'ş', 't', 'u', 'ü', 'v', 'y', 'z',
];

/// Sort key of an already lower-cased character. Spaces, digits and ASCII
/// punctuation go before the alphabet, anything else after it.
fn collation_key(c: char) -> (u8, u32) {
    match ALPHABET.iter().position(|&letter| letter == c) {
        Some(rank) => (1, rank as u32),
        None if c < 'a' => (0, u32::from(c)),
        None => (2, u32::from(c)),
    }
}

/// Compare two place names in Turkish alphabetical order, ignoring case.
///
/// `I` lower-cases to dotless `ı` and `İ` to `i`, so "Iğdır" sorts with the
/// `ı` words and "İzmir" with the `i` words.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fn keys(name: &str) -> impl Iterator<Item = (u8, u32)> + '_ {
        name.chars()
            .flat_map(|c| match c {
                'I' => 'ı'.to_lowercase(),
                'İ' => 'i'.to_lowercase(),
                _ => c.to_lowercase(),
            })
            .map(collation_key)
    }

    keys(a).cmp(keys(b))
}

/// Lower-case `input`, fold Turkish diacritics and title-case the first
/// character.
///
/// Works on `char`s, so multi-byte letters are handled as a unit. Characters
/// outside the fold table are kept as they are. Surrounding whitespace is
/// dropped first.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidArgument`] when `input` is empty or only
/// whitespace; there is no first character to capitalize.
pub fn normalize(input: &str) -> Result<String, WeatherError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(WeatherError::InvalidArgument(
            "location name must not be empty".to_string(),
        ));
    }

    // `İ` lower-cases to "i\u{307}" in Unicode; upstream spells it as a bare `i`.
    let mut folded = input
        .chars()
        .flat_map(|c| if c == 'İ' { 'i'.to_lowercase() } else { c.to_lowercase() })
        .map(fold);

    let mut result = String::with_capacity(input.len());
    if let Some(first) = folded.next() {
        result.extend(first.to_uppercase());
    }
    result.extend(folded);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_every_mapped_character() {
        assert_eq!(normalize("ığşçüö").unwrap(), "Igscuo");
        assert_eq!(normalize("IĞŞÇÜÖ").unwrap(), "Igscuo");
    }

    #[test]
    fn capitalizes_only_first_character() {
        assert_eq!(normalize("TRABZON").unwrap(), "Trabzon");
        assert_eq!(normalize("trabzon").unwrap(), "Trabzon");
        assert_eq!(normalize("tRaBzOn").unwrap(), "Trabzon");
    }

    #[test]
    fn mixed_case_diacritics_resolve_to_canonical_form() {
        let canonical = normalize("Niğde").unwrap();
        assert_eq!(canonical, "Nigde");
        assert_eq!(normalize("niĞdE").unwrap(), canonical);
        assert_eq!(normalize("NİĞDE").unwrap(), canonical);
        assert_eq!(normalize("Çanakkale").unwrap(), "Canakkale");
        assert_eq!(normalize("İSTANBUL").unwrap(), "Istanbul");
        assert_eq!(normalize("Şanlıurfa").unwrap(), "Sanliurfa");
    }

    #[test]
    fn leaves_unmapped_characters_alone() {
        assert_eq!(normalize("afyon-karahisar 2").unwrap(), "Afyon-karahisar 2");
        assert_eq!(normalize("âb").unwrap(), "Âb");
        assert_eq!(normalize("merkez").unwrap(), "Merkez");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_title_casing() {
        assert_eq!(normalize("  trabzon ").unwrap(), "Trabzon");
        assert_eq!(normalize("\tçanakkale\n").unwrap(), "Canakkale");
    }

    #[test]
    fn names_compare_in_turkish_alphabetical_order() {
        let mut names = vec!["Ulukışla", "Çiftlik", "Bor", "Zara", "Ceyhan", "Altunhisar"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, ["Altunhisar", "Bor", "Ceyhan", "Çiftlik", "Ulukışla", "Zara"]);

        assert_eq!(compare_names("Ödemiş", "Ordu"), Ordering::Greater);
        assert_eq!(compare_names("Şile", "Sinop"), Ordering::Greater);
        assert_eq!(compare_names("Şile", "Tokat"), Ordering::Less);
    }

    #[test]
    fn dotted_and_dotless_i_are_distinct_letters() {
        assert_eq!(compare_names("Iğdır", "İzmir"), Ordering::Less);
        assert_eq!(compare_names("Isparta", "Ilgaz"), Ordering::Greater);
        assert_eq!(compare_names("Iğdır", "Hakkari"), Ordering::Greater);
        assert_eq!(compare_names("İzmir", "Jandarma"), Ordering::Less);
    }

    #[test]
    fn name_comparison_ignores_case() {
        assert_eq!(compare_names("BOR", "bor"), Ordering::Equal);
        assert_eq!(compare_names("ÇORUM", "çankırı"), Ordering::Greater);
    }

    #[test]
    fn separators_sort_before_letters() {
        assert_eq!(compare_names("Ak Dağ", "Akdağ"), Ordering::Less);
        assert_eq!(compare_names("Merkez", "Merkez 2"), Ordering::Less);
    }

    #[test]
    fn rejects_empty_input() {
        let err = normalize("").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidArgument(_)));

        let err = normalize("   ").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidArgument(_)));
    }
}
