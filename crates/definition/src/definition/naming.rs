//! Naming conventions used when inferring relationship keys and table names

use convert_case::{Boundary, Case, Casing};

/// Word boundaries for model names. Digits stay attached to the word before
/// them, so `Oauth2Client` splits only before `Client`.
const NAME_BOUNDARIES: [Boundary; 6] = [
    Boundary::Underscore,
    Boundary::Hyphen,
    Boundary::Space,
    Boundary::LowerUpper,
    Boundary::DigitUpper,
    Boundary::Acronym,
];

/// Snake case form of a model name (`BlogPost` -> `blog_post`)
pub fn snake_name(model_name: &str) -> String {
    model_name
        .set_boundaries(&NAME_BOUNDARIES)
        .to_case(Case::Snake)
        .to_lowercase()
}

/// Foreign key name for a model (`User` -> `user_id`)
pub fn foreign_key_for(model_name: &str, suffix: &str) -> String {
    format!("{}{}", snake_name(model_name), suffix)
}

/// Pivot table name for a many-to-many relationship.
///
/// Both model names are concatenated in lexicographic order so either side
/// of the relationship computes the same name (`Role` + `User` -> `RoleUser`).
pub fn pivot_table_name(first: &str, second: &str) -> String {
    let mut names = [first, second];
    names.sort_unstable();
    names.concat()
}

/// Table name inferred from a model name (`Category` -> `categories`)
pub fn table_name_for(model_name: &str) -> String {
    pluralize(&snake_name(model_name))
}

/// Simple pluralization (English-centric)
pub fn pluralize(name: &str) -> String {
    let vowel_y = ["ay", "ey", "iy", "oy", "uy"];
    if name.ends_with('y') && !vowel_y.iter().any(|suffix| name.ends_with(suffix)) {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s')
        || name.ends_with("sh")
        || name.ends_with("ch")
        || name.ends_with('x')
        || name.ends_with('z')
    {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}
