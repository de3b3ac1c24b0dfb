//! Normalization rules: static vocabularies and pure functions shared by all
//! source cleaners. Nothing in this module performs I/O or returns errors —
//! unmapped input always resolves to a documented fallback value.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Multilingual country name -> ISO2 code.
const COUNTRY_MAPPING: &[(&str, &str)] = &[
    ("france", "FR"),
    ("francia", "FR"),
    ("frankreich", "FR"),
    ("germany", "DE"),
    ("allemagne", "DE"),
    ("deutschland", "DE"),
    ("netherlands", "NL"),
    ("pays-bas", "NL"),
    ("niederlande", "NL"),
    ("belgium", "BE"),
    ("belgique", "BE"),
    ("belgien", "BE"),
    ("spain", "ES"),
    ("espagne", "ES"),
    ("spanien", "ES"),
    ("italy", "IT"),
    ("italie", "IT"),
    ("italien", "IT"),
    ("united kingdom", "GB"),
    ("royaume-uni", "GB"),
    ("uk", "GB"),
    ("poland", "PL"),
    ("pologne", "PL"),
    ("polen", "PL"),
    ("sweden", "SE"),
    ("suède", "SE"),
    ("schweden", "SE"),
    ("norway", "NO"),
    ("norvège", "NO"),
    ("norwegen", "NO"),
    ("united states", "US"),
    ("usa", "US"),
    ("america", "US"),
    ("worldwide", "WW"),
    ("remote", "WW"),
    ("global", "WW"),
];

/// Technology taxonomy grouped by category. Matching is substring
/// containment, which is a known source of false positives for short
/// tokens like "go" — kept for compatibility with existing cleaned data.
pub const TECH_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "languages",
        &[
            "python",
            "javascript",
            "java",
            "typescript",
            "c++",
            "c#",
            "go",
            "rust",
            "php",
            "ruby",
            "swift",
            "kotlin",
        ],
    ),
    (
        "frameworks",
        &[
            "react", "vue", "angular", "django", "flask", "spring", "laravel", "express",
            "next.js", "nuxt",
        ],
    ),
    (
        "databases",
        &[
            "mysql",
            "postgresql",
            "mongodb",
            "redis",
            "sqlite",
            "oracle",
            "elasticsearch",
        ],
    ),
    (
        "cloud",
        &["aws", "azure", "gcp", "docker", "kubernetes", "terraform"],
    ),
    (
        "tools",
        &["git", "jenkins", "ansible", "maven", "gradle", "webpack"],
    ),
];

/// Survey-style role titles -> canonical technology tags.
const TECH_MAPPING: &[(&str, &str)] = &[
    (
        "Data scientist or machine learning specialist",
        "data-science;machine-learning",
    ),
    ("Developer, front-end", "frontend"),
    ("Developer, back-end", "backend"),
    ("Developer, full-stack", "fullstack"),
    ("Engineer, data", "data-engineering"),
    ("Engineer, site reliability", "sre;devops"),
    ("Developer, mobile", "mobile"),
    (
        "Developer, desktop or enterprise applications",
        "desktop;enterprise",
    ),
    ("Developer, game or graphics", "game-dev;graphics"),
    (
        "Developer, embedded applications or devices",
        "embedded;iot",
    ),
    ("DevOps specialist", "devops"),
    ("Database administrator", "database;sql"),
    ("System administrator", "sysadmin"),
    ("Network engineer", "networking"),
    ("Cloud infrastructure engineer", "cloud;infrastructure"),
    ("Security engineer", "security"),
    ("QA or test developer", "testing;qa"),
];

/// Ordered job-title patterns; the first canonical tag whose keyword list
/// matches wins.
const TITLE_PATTERNS: &[(&str, &[&str])] = &[
    (
        "data-scientist",
        &["data scientist", "machine learning", "ml engineer", "ai engineer"],
    ),
    (
        "frontend-developer",
        &["front-end", "frontend", "front end", "ui developer"],
    ),
    (
        "backend-developer",
        &["back-end", "backend", "back end", "server developer"],
    ),
    ("fullstack-developer", &["full-stack", "fullstack", "full stack"]),
    (
        "devops-engineer",
        &["devops", "site reliability", "sre", "infrastructure"],
    ),
    (
        "mobile-developer",
        &["mobile", "ios", "android", "react native", "flutter"],
    ),
    (
        "qa-engineer",
        &["qa", "quality assurance", "test engineer", "testing"],
    ),
    ("data-engineer", &["data engineer", "data pipeline", "etl"]),
    ("security-engineer", &["security", "cybersecurity", "infosec"]),
    ("product-manager", &["product manager", "pm", "product owner"]),
    (
        "software-engineer",
        &["software engineer", "software developer", "programmer"],
    ),
];

/// Trend keyword -> country heuristic, used when a trend row has no geo.
const KEYWORD_COUNTRY_HINTS: &[(&str, &str)] = &[
    ("python", "US"),
    ("javascript", "US"),
    ("java", "US"),
    ("typescript", "US"),
    ("react", "US"),
    ("angular", "US"),
    ("vue", "FR"),
    ("php", "FR"),
    ("symfony", "FR"),
    ("laravel", "GB"),
    ("ruby", "JP"),
    ("go", "US"),
    ("rust", "US"),
    ("swift", "US"),
    ("kotlin", "US"),
];

/// Ordered substring rules classifying a technology token into a skill group.
const SKILL_GROUP_RULES: &[(&str, &[&str])] = &[
    (
        "programming_language",
        &[
            "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust", "kotlin",
            "swift",
        ],
    ),
    ("frontend", &["react", "vue", "angular", "html", "css", "bootstrap"]),
    (
        "backend",
        &["django", "flask", "spring", "node", "express", "fastapi"],
    ),
    (
        "cloud",
        &["aws", "azure", "gcp", "docker", "kubernetes", "cloud"],
    ),
    (
        "database",
        &["sql", "mysql", "postgresql", "mongodb", "redis", "database"],
    ),
    (
        "data_science",
        &["tensorflow", "pytorch", "ml", "ai", "data", "analytics"],
    ),
];

pub const SALARY_MIN_PLAUSIBLE: f64 = 10_000.0;
pub const SALARY_MAX_PLAUSIBLE: f64 = 500_000.0;

/// Normalize a country name to an ISO2 code. Unmapped names fall back to
/// the first two characters uppercased; empty input yields "Unknown".
pub fn normalize_country(country: &str) -> String {
    let cleaned = country.trim().to_lowercase();
    if cleaned.is_empty() {
        return "Unknown".to_string();
    }
    if let Some((_, iso2)) = COUNTRY_MAPPING.iter().find(|(name, _)| *name == cleaned) {
        return (*iso2).to_string();
    }
    cleaned.chars().take(2).flat_map(char::to_uppercase).collect()
}

/// Scan free text for taxonomy technologies. Case-insensitive substring
/// containment over every category.
pub fn extract_technologies(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    if text.trim().is_empty() {
        return found;
    }
    let lower = text.to_lowercase();
    for (_, techs) in TECH_KEYWORDS {
        for tech in *techs {
            if lower.contains(tech) {
                found.insert((*tech).to_string());
            }
        }
    }
    found
}

/// Harmonize a technology field to the canonical `;`-joined, sorted,
/// deduplicated, lowercase format. Idempotent.
pub fn harmonize_technologies(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    // Already in canonical separator format: only case-normalize and dedup.
    if raw.contains(';') && !raw.contains(',') {
        let techs: BTreeSet<String> = raw
            .split(';')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        return techs.into_iter().collect::<Vec<_>>().join(";");
    }

    // Legacy comma-separated format: map known role titles, extract from the rest.
    if raw.contains(',') {
        let mut techs = BTreeSet::new();
        for part in raw.split(',').map(str::trim) {
            if let Some((_, tags)) = TECH_MAPPING.iter().find(|(title, _)| *title == part) {
                techs.extend(tags.split(';').map(|t| t.to_lowercase()));
            } else {
                techs.extend(extract_technologies(part));
            }
        }
        return techs.into_iter().filter(|t| !t.is_empty()).collect::<Vec<_>>().join(";");
    }

    // Free text.
    let extracted = extract_technologies(raw);
    if extracted.is_empty() {
        raw.trim().to_lowercase()
    } else {
        extracted.into_iter().collect::<Vec<_>>().join(";")
    }
}

/// Map a free-text job title onto the canonical tag set. No match yields
/// "other"; empty input yields "Other" (the distinct casing separates the
/// empty path from the unmatched path).
pub fn harmonize_job_title(title: &str) -> String {
    if title.trim().is_empty() {
        return "Other".to_string();
    }
    let lower = title.trim().to_lowercase();
    for (tag, keywords) in TITLE_PATTERNS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return (*tag).to_string();
        }
    }
    "other".to_string()
}

/// Coerce a salary value to a number inside the plausible band
/// [10_000, 500_000]; anything else is None, never clamped.
pub fn clean_salary(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let salary: f64 = trimmed.parse().ok()?;
    if (SALARY_MIN_PLAUSIBLE..=SALARY_MAX_PLAUSIBLE).contains(&salary) {
        Some(salary)
    } else {
        None
    }
}

static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid pattern"));
static REPEATED_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""+"#).expect("valid pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Repair text encoding: strip control characters, fold common accented
/// characters to ASCII, collapse repeated quotes and whitespace.
pub fn clean_text_encoding(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = CONTROL_CHARS.replace_all(text, "");
    let text: String = text
        .chars()
        .map(|c| match c {
            'é' | 'è' => 'e',
            'à' | 'ä' => 'a',
            'ù' | 'ü' => 'u',
            'ô' | 'ö' => 'o',
            'ç' => 'c',
            'ñ' => 'n',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect();
    let text = text.replace('ß', "ss");
    let text = REPEATED_QUOTES.replace_all(&text, "\"");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Strip HTML markup from a description field and repair its encoding.
pub fn strip_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let fragment = scraper::Html::parse_fragment(html);
    let text = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    clean_text_encoding(&text)
}

/// Country hint for a trend keyword when the row carries no geo.
pub fn keyword_country_hint(keyword: &str) -> Option<&'static str> {
    let lower = keyword.trim().to_lowercase();
    KEYWORD_COUNTRY_HINTS
        .iter()
        .find(|(k, _)| *k == lower)
        .map(|(_, c)| *c)
}

/// Taxonomy category for an exact keyword, used for trend rows.
pub fn categorize_technology(keyword: &str) -> &'static str {
    let lower = keyword.trim().to_lowercase();
    for (category, techs) in TECH_KEYWORDS {
        if techs.contains(&lower.as_str()) {
            return category;
        }
    }
    "other"
}

/// Bucket a repository star count.
pub fn popularity_category(stars: i64) -> &'static str {
    match stars {
        s if s > 10_000 => "viral",
        s if s > 100 => "high",
        s if s > 10 => "medium",
        _ => "low",
    }
}

/// Bucket professional experience in years.
pub fn experience_level(years: f64) -> &'static str {
    match years {
        y if y > 10.0 => "expert",
        y if y > 5.0 => "senior",
        y if y > 2.0 => "mid",
        _ => "junior",
    }
}

static SALARY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)\s*k€",
        r"(\d+)\s*000\s*€",
        r"€\s*(\d+)",
        r"(\d+)\s*€",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid pattern"))
    .collect()
});

/// Extract a plausible annual salary from free text such as "45k€" or
/// "€52000". Returns None when nothing in the plausible band is found.
pub fn extract_salary_from_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let haystack = trimmed.replace(',', "");
    for pattern in SALARY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&haystack) {
            let mut value: f64 = caps.get(1)?.as_str().parse().ok()?;
            if haystack.contains("k€") {
                value *= 1000.0;
            }
            if (SALARY_MIN_PLAUSIBLE..=SALARY_MAX_PLAUSIBLE).contains(&value) {
                return Some(value);
            }
        }
    }
    None
}

/// Classify a technology token into a skill group. First matching group
/// wins; unmatched tokens land in "other".
pub fn classify_skill_group(tech: &str) -> &'static str {
    let lower = tech.trim().to_lowercase();
    for (group, needles) in SKILL_GROUP_RULES {
        if needles.iter().any(|n| lower.contains(n)) {
            return group;
        }
    }
    "other"
}
