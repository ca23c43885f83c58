//! Semantic fake-data generators for request payloads
//!
//! Every function draws from the caller's `Rng`, so a seeded generator
//! reproduces fixtures exactly. No uniqueness is guaranteed across calls;
//! callers needing composite identifiers build them from several calls
//! and accept the collision odds of a test fixture.

use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Carlos", "Dana", "Edsger", "Frances", "Grace", "Hal", "Ines",
    "John", "Katherine", "Leslie", "Margaret", "Niklaus", "Olga", "Peter", "Radia", "Sofia",
    "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Baker", "Costa", "Dijkstra", "Engel", "Ferreira", "Gomez", "Hopper", "Iwata",
    "Johnson", "Kay", "Lamport", "Moreira", "Nakamura", "Oliveira", "Perlman", "Ribeiro",
    "Silva", "Torvalds", "Wirth",
];

const CITIES: &[&str] = &[
    "Porto Alegre", "Lisbon", "Austin", "Nagoya", "Curitiba", "Leipzig", "Gothenburg",
    "Wellington", "Salvador", "Edinburgh", "Recife", "Tampere", "Bologna", "Campinas",
    "Gdansk", "Valparaiso",
];

const STREET_NAMES: &[&str] = &[
    "Cedar", "Chestnut", "Elm", "Harbor", "Hazel", "Juniper", "Linden", "Magnolia", "Maple",
    "Mulberry", "Oak", "Poplar", "Rowan", "Spruce", "Walnut", "Willow",
];

const STREET_KINDS: &[&str] = &["Street", "Avenue", "Lane", "Road"];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "test.dev", "mail.test"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim",
    "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo", "consequat", "duis", "aute", "irure", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint",
];

fn pick<'a>(rng: &mut impl Rng, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn random_digits(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

pub(crate) fn random_alnum(rng: &mut impl Rng, len: usize) -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    (0..len)
        .map(|_| char::from(CHARS[rng.gen_range(0..CHARS.len())]))
        .collect()
}

pub fn first_name(rng: &mut impl Rng) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn last_name(rng: &mut impl Rng) -> String {
    pick(rng, LAST_NAMES).to_string()
}

pub fn full_name(rng: &mut impl Rng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub fn username(rng: &mut impl Rng) -> String {
    format!(
        "{}{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        rng.gen_range(1..9999u32)
    )
}

pub fn password(rng: &mut impl Rng, len: usize) -> String {
    random_alnum(rng, len.max(1))
}

pub fn email(rng: &mut impl Rng) -> String {
    format!(
        "{}.{}{}@{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase(),
        rng.gen_range(1..999u32),
        pick(rng, EMAIL_DOMAINS)
    )
}

pub fn city(rng: &mut impl Rng) -> String {
    pick(rng, CITIES).to_string()
}

pub fn street(rng: &mut impl Rng) -> String {
    format!(
        "{} {} {}",
        rng.gen_range(1..9999u32),
        pick(rng, STREET_NAMES),
        pick(rng, STREET_KINDS)
    )
}

pub fn zip_code(rng: &mut impl Rng) -> String {
    random_digits(rng, 5)
}

pub fn phone_number(rng: &mut impl Rng) -> String {
    format!(
        "({}) {}-{}",
        random_digits(rng, 3),
        random_digits(rng, 3),
        random_digits(rng, 4)
    )
}

/// Latitude in [-90, 90], rounded to 6 decimal places.
pub fn latitude(rng: &mut impl Rng) -> f64 {
    round6(rng.gen_range(-90.0..=90.0))
}

/// Longitude in [-180, 180], rounded to 6 decimal places.
pub fn longitude(rng: &mut impl Rng) -> f64 {
    round6(rng.gen_range(-180.0..=180.0))
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

pub fn words(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| pick(rng, LOREM))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn sentence(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(4..=9);
    let body = words(rng, count);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub fn sentences(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn paragraph(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(3..=5);
    sentences(rng, count)
}

/// Integer in [min, max]. A reversed range collapses to `min`.
pub fn int_in_range(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max.max(min))
}

pub fn image_url(rng: &mut impl Rng, width: u32, height: u32) -> String {
    format!(
        "https://picsum.photos/seed/{}/{width}/{height}",
        random_alnum(rng, 8)
    )
}

/// Random ISO-8601 timestamp between 2020 and 2029, e.g.
/// `"2024-07-09T18:02:47Z"`. Day-of-month stops at 28 so every drawn
/// date is valid.
pub fn iso_timestamp(rng: &mut impl Rng) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        rng.gen_range(2020..=2029),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60),
    )
}
