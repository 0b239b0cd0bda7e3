//! Naming utilities: identifier cleanup and English singular/plural forms

use heck::{ToPascalCase, ToSnakeCase};

/// Irregular plurals (common in database contexts)
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("criterion", "criteria"),
    ("alias", "aliases"),
    ("movie", "movies"),
    ("quiz", "quizzes"),
];

/// Same in both forms
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "metadata",
    "series",
    "species",
    "news",
    "sheep",
    "fish",
    "deer",
    "staff",
    "inventory",
];

const F_TO_VES: &[&str] = &[
    "leaf", "knife", "wife", "life", "shelf", "self", "half", "calf", "loaf", "thief", "wolf",
];

const O_TO_OES: &[&str] = &["hero", "potato", "tomato", "echo", "veto"];

/// Singular endings in `se` whose plural only adds `s`
const SE_ENDINGS: &[&str] = &["ouse", "ause", "ense", "onse", "urse", "ise", "lse", "ose"];

/// Singular words in `-ase`/`-use` that would otherwise lose their `e`
const SE_WORDS: &[&str] = &[
    "case", "base", "phase", "chase", "ease", "vase", "abuse", "excuse", "fuse", "muse",
];

/// Singular words ending in `as`
const AS_WORDS: &[&str] = &["gas", "canvas", "bias", "atlas", "pancreas"];

/// Clean an identifier into the PascalCase member style.
///
/// Characters other than letters, digits and word separators are dropped. A
/// result starting with a digit is prefixed with `_`.
pub fn format_text(name: &str) -> String {
    let pascal = sanitize(name).to_pascal_case();
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", pascal)
    } else {
        pascal
    }
}

/// PascalCase identifier with its last word in singular form
pub fn format_singular(name: &str) -> String {
    format_text(&inflect_last_word(name, singularize))
}

/// PascalCase identifier with its last word in plural form
pub fn format_plural(name: &str) -> String {
    format_text(&inflect_last_word(name, |w| pluralize(&singularize(w))))
}

/// Keep letters, digits and separators; everything else becomes a word break
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

fn inflect_last_word(name: &str, inflect: impl Fn(&str) -> String) -> String {
    let snake = sanitize(name).to_snake_case();
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, inflect(last)),
        None => inflect(&snake),
    }
}

/// Pluralize a lowercase word using English grammar rules
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLES.contains(&word) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULARS {
        if word == *singular || word == *plural {
            return plural.to_string();
        }
    }

    // Words ending in -is → -es (analysis → analyses, basis → bases)
    if word.ends_with("is") && word.len() > 2 {
        return format!("{}es", &word[..word.len() - 2]);
    }

    // Words ending in -f or -fe → -ves (leaf → leaves, knife → knives)
    if F_TO_VES.contains(&word) {
        let stem = word
            .strip_suffix("fe")
            .or_else(|| word.strip_suffix('f'))
            .unwrap_or(word);
        return format!("{}ves", stem);
    }

    // Words ending in -o: some take -es
    if O_TO_OES.contains(&word) {
        return format!("{}es", word);
    }

    // Standard rules: -s, -x, -z, -ch, -sh → add -es
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{}es", word);
    }

    // Words ending in consonant + y → -ies
    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    // Default: just add -s
    format!("{}s", word)
}

/// Singularize a lowercase word; words already singular come back unchanged
pub fn singularize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLES.contains(&word) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULARS {
        if word == *plural || word == *singular {
            return singular.to_string();
        }
    }

    for &fword in F_TO_VES {
        if word == pluralize(fword) {
            return fword.to_string();
        }
    }

    for &oword in O_TO_OES {
        if word == format!("{}es", oword) {
            return oword.to_string();
        }
    }

    // analyses → analysis
    if let Some(stem) = word.strip_suffix("yses") {
        return format!("{}ysis", stem);
    }

    // categories → category
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }

    if let Some(stem) = word.strip_suffix('s') {
        // cases → case, houses → house, databases → database
        if SE_WORDS.iter().any(|w| stem.ends_with(w))
            || SE_ENDINGS.iter().any(|e| stem.ends_with(e))
        {
            return stem.to_string();
        }
    }

    // boxes → box, matches → match, addresses → address, buses → bus, gases → gas
    for suffix in ["sses", "xes", "zes", "ches", "shes", "uses", "ases"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    // Already singular: status, address, analysis, canvas
    if word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
        || AS_WORDS.iter().any(|w| word.ends_with(w))
    {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
