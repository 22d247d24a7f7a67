//! Synthetic values used to fill generated files.
//!
//! `Fake` owns its RNG so that a seeded instance reproduces the same content
//! (file names are drawn from the thread RNG and are not affected).

use crate::utils::error::{FakeFileError, Result};
use crate::utils::validation::validate_range;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Smallest limit [`Fake::text`] accepts.
pub const MIN_TEXT_MAX_NB_CHARS: usize = 5;

const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium",
    "doloremque", "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis",
    "et", "quasi", "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo", "aspernatur",
    "odit", "fugit", "sed", "quia", "consequuntur", "magni", "dolores", "eos", "qui", "ratione",
    "sequi", "nesciunt", "neque", "dolorem", "ipsum", "quisquam", "est", "dolor", "amet",
    "consectetur", "adipisci", "velit", "numquam", "eius", "modi", "tempora", "incidunt", "ut",
    "labore", "dolore", "magnam", "aliquam", "quaerat", "enim", "ad", "minima", "veniam",
    "quis", "nostrum", "exercitationem", "ullam", "corporis", "nemo", "ipsam", "voluptas",
    "suscipit", "laboriosam", "nisi", "aliquid", "ex", "ea", "commodi", "autem", "vel", "eum",
    "iure", "reprehenderit", "in", "voluptate", "esse", "quam", "nihil", "molestiae", "iusto",
    "odio", "dignissimos", "ducimus", "blanditiis", "praesentium", "laudantium", "totam", "rem",
    "voluptatum", "deleniti", "atque", "corrupti", "quos", "quas", "molestias", "excepturi",
    "sint", "occaecati", "cupiditate", "non", "provident", "similique", "culpa", "officia",
    "deserunt", "mollitia", "animi", "id", "laborum", "harum", "quidem", "rerum", "facilis",
    "expedita", "distinctio", "nam", "libero", "tempore", "cum", "soluta", "nobis", "eligendi",
    "optio", "cumque", "impedit", "quo", "porro", "minus", "maxime", "placeat", "facere",
    "possimus", "omnis", "assumenda", "repellendus", "temporibus", "quibusdam", "officiis",
    "debitis", "saepe", "eveniet", "voluptates", "repudiandae", "recusandae", "itaque", "earum",
    "hic", "tenetur", "sapiente", "delectus", "reiciendis", "voluptatibus", "maiores",
    "doloribus", "asperiores", "repellat",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carla", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
    "Kira", "Liam", "Mariam", "Noah", "Olga", "Pavel", "Quinn", "Rosa", "Samir", "Tara",
    "Umar", "Vera", "Wen", "Xenia", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Barseghyan", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hakobyan",
    "Ivanova", "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Petrov", "Quispe",
    "Rossi", "Schmidt", "Tanaka", "Ueda", "Varga", "Weber", "Xu", "Yilmaz", "Zhang",
];

const CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Cairo", "Dublin", "Yerevan", "Florence", "Gdansk", "Helsinki",
    "Istanbul", "Jakarta", "Kyoto", "Lisbon", "Montreal", "Nairobi", "Oslo", "Porto", "Quito",
    "Riga", "Seoul", "Tbilisi", "Utrecht", "Valencia", "Warsaw", "Zagreb",
];

const COUNTRIES: &[&str] = &[
    "Armenia", "Brazil", "Canada", "Denmark", "Estonia", "France", "Germany", "Hungary",
    "Iceland", "Japan", "Kenya", "Latvia", "Mexico", "Netherlands", "Norway", "Portugal",
    "Spain", "Sweden", "Turkey", "Uruguay", "Vietnam",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Square"];

const COMPANY_SUFFIXES: &[&str] = &["Ltd", "LLC", "Group", "and Sons", "Inc", "GmbH"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Luminosity {
    Bright,
    Light,
    Dark,
    Random,
}

/// Hue constraint for [`Fake::color`]: a single degree, an inclusive
/// `[min, max]` range, or a color name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hue {
    Degrees(u16),
    Range([u16; 2]),
    Named(String),
}

/// Named hues, in degrees. `red` wraps around 0.
const NAMED_HUES: &[(&str, u16, u16)] = &[
    ("red", 334, 378),
    ("orange", 19, 46),
    ("yellow", 47, 62),
    ("green", 63, 178),
    ("blue", 179, 257),
    ("purple", 258, 282),
    ("pink", 283, 333),
];

impl Hue {
    /// Inclusive degree bounds. `max` may exceed 359 for ranges that wrap.
    pub fn bounds(&self) -> Result<(u16, u16)> {
        match self {
            Hue::Degrees(h) => {
                validate_range("hue", *h, 0, 359)?;
                Ok((*h, *h))
            }
            Hue::Range([min, max]) => {
                validate_range("hue", *min, 0, 359)?;
                validate_range("hue", *max, 0, 359)?;
                if min > max {
                    return Err(FakeFileError::invalid_option(
                        "hue",
                        format!("range start {} is after its end {}", min, max),
                    ));
                }
                Ok((*min, *max))
            }
            Hue::Named(name) => NAMED_HUES
                .iter()
                .find(|(n, _, _)| n.eq_ignore_ascii_case(name.trim()))
                .map(|(_, min, max)| (*min, *max))
                .ok_or_else(|| {
                    let known: Vec<&str> = NAMED_HUES.iter().map(|(n, _, _)| *n).collect();
                    FakeFileError::invalid_option(
                        "hue",
                        format!("unknown color '{}'; known: {}", name, known.join(", ")),
                    )
                }),
        }
    }
}

#[derive(Debug)]
pub struct Fake {
    rng: StdRng,
}

impl Default for Fake {
    fn default() -> Self {
        Self::new()
    }
}

impl Fake {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn word(&mut self) -> String {
        self.pick(WORDS).to_string()
    }

    pub fn words(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.word()).collect()
    }

    pub fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(4..=10);
        let mut sentence = self.words(count).join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    pub fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(3..=6);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Random text of at most `max_nb_chars` characters, never empty.
    ///
    /// Short limits produce words, medium limits sentences and long limits
    /// newline-separated paragraphs. Limits below [`MIN_TEXT_MAX_NB_CHARS`]
    /// are rejected.
    pub fn text(&mut self, max_nb_chars: usize) -> Result<String> {
        if max_nb_chars < MIN_TEXT_MAX_NB_CHARS {
            return Err(FakeFileError::invalid_option(
                "max_nb_chars",
                format!("must be at least {}", MIN_TEXT_MAX_NB_CHARS),
            ));
        }
        let separator = if max_nb_chars < 100 { " " } else { "\n" };
        let unit = |fake: &mut Fake| {
            if max_nb_chars < 25 {
                fake.word()
            } else if max_nb_chars < 100 {
                fake.sentence()
            } else {
                fake.paragraph()
            }
        };

        let mut text = String::new();
        let mut len = 0;
        loop {
            let next = unit(self);
            let extra = if text.is_empty() {
                next.chars().count()
            } else {
                next.chars().count() + separator.len()
            };
            if len + extra > max_nb_chars {
                break;
            }
            if !text.is_empty() {
                text.push_str(separator);
            }
            text.push_str(&next);
            len += extra;
        }

        if text.is_empty() {
            // A single unit did not fit; fall back to a truncated word list.
            text = self.words(max_nb_chars).join(" ");
            text = text.chars().take(max_nb_chars).collect::<String>().trim_end().to_string();
        }
        Ok(text)
    }

    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    pub fn name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn email(&mut self) -> String {
        let user = format!("{}.{}", self.first_name(), self.last_name()).to_lowercase();
        format!("{}@{}", user, self.pick(DOMAINS))
    }

    pub fn city(&mut self) -> String {
        self.pick(CITIES).to_string()
    }

    pub fn country(&mut self) -> String {
        self.pick(COUNTRIES).to_string()
    }

    pub fn street_address(&mut self) -> String {
        let number = self.rng.gen_range(1..=999);
        let mut street = self.last_name();
        street.push(' ');
        street.push_str(self.pick(STREET_SUFFIXES));
        format!("{} {}", number, street)
    }

    pub fn postcode(&mut self) -> String {
        format!("{:05}", self.rng.gen_range(1000..99999))
    }

    pub fn address(&mut self) -> String {
        format!(
            "{}\n{} {}, {}",
            self.street_address(),
            self.postcode(),
            self.city(),
            self.country()
        )
    }

    pub fn company(&mut self) -> String {
        format!("{} {}", self.last_name(), self.pick(COMPANY_SUFFIXES))
    }

    pub fn url(&mut self) -> String {
        format!("https://{}/{}", self.pick(DOMAINS), self.word())
    }

    pub fn date(&mut self) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        epoch + Duration::days(self.rng.gen_range(0..20_000))
    }

    pub fn date_time(&mut self) -> DateTime<Utc> {
        let secs = self.rng.gen_range(0..1_700_000_000i64);
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
    }

    pub fn isbn13(&mut self) -> String {
        let mut digits: Vec<u32> = vec![9, 7, 8];
        for _ in 0..9 {
            digits.push(self.rng.gen_range(0..10));
        }
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
            .sum();
        digits.push((10 - sum % 10) % 10);
        digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect()
    }

    pub fn hex_token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from_digit(self.rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect()
    }

    pub fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    pub fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.rng.fill_bytes(&mut buf);
        buf
    }

    /// RGB color, optionally constrained to a hue and a luminosity band.
    pub fn color(&mut self, hue: Option<&Hue>, luminosity: Option<Luminosity>) -> Result<[u8; 3]> {
        let hue = match hue {
            Some(hue) => {
                let (min, max) = hue.bounds()?;
                f32::from(self.rng.gen_range(min..=max) % 360)
            }
            None => self.rng.gen_range(0.0..360.0),
        };
        let (saturation, value) = match luminosity.unwrap_or(Luminosity::Random) {
            Luminosity::Bright => (self.rng.gen_range(0.55..1.0), self.rng.gen_range(0.85..1.0)),
            Luminosity::Light => (self.rng.gen_range(0.1..0.4), self.rng.gen_range(0.85..1.0)),
            Luminosity::Dark => (self.rng.gen_range(0.5..1.0), self.rng.gen_range(0.15..0.45)),
            Luminosity::Random => (self.rng.gen_range(0.0..1.0), self.rng.gen_range(0.0..1.0)),
        };
        Ok(hsv_to_rgb(hue, saturation, value))
    }
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match hue as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let scale = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [scale(r), scale(g), scale(b)]
}
