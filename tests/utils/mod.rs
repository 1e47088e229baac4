//! Shared fixtures: CSV files laid out like the real statistics downloads.

use std::fs;
use std::path::Path;

use jpop_dash::DashboardConfig;
use tempfile::TempDir;

/// Age brackets of a synthetic national row: bracket `k` holds `(k + 1) * scale`
pub fn bracket_values(scale: u64) -> Vec<u64> {
    (1..=21).map(|k| k * scale).collect()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_lines(preamble: usize, header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for i in 0..preamble {
        out.push_str(&format!("preamble line {i}\n"));
    }
    out.push_str(
        &header
            .iter()
            .map(|h| quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    out
}

/// Format a count the way the source files do, with thousands separators
pub fn with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Figures of one prefecture row
#[derive(Debug, Clone, Copy)]
pub struct Prefecture<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub male: i64,
    pub female: i64,
    pub births: i64,
    pub deaths: i64,
    pub net_change: i64,
    pub rate: f64,
}

impl<'a> Prefecture<'a> {
    pub const fn new(code: &'a str, name: &'a str, male: i64, female: i64, rate: f64) -> Self {
        Self {
            code,
            name,
            male,
            female,
            births: 1_000,
            deaths: 1_500,
            net_change: -500,
            rate,
        }
    }

    /// The 24 raw cells of this prefecture
    pub fn cells(&self) -> Vec<String> {
        let total = self.male + self.female;
        let natural = self.births - self.deaths;
        let social = self.net_change - natural;
        vec![
            self.code.to_string(),
            self.name.to_string(),
            with_commas(self.male),
            with_commas(self.female),
            with_commas(total),
            with_commas(total / 2),
            "100".into(),
            "10".into(),
            "110".into(),
            with_commas(self.births),
            "0".into(),
            "1,110".into(),
            "90".into(),
            "5".into(),
            "95".into(),
            with_commas(self.deaths),
            "0".into(),
            "1,595".into(),
            with_commas(self.net_change),
            format!("{:.2}", self.rate),
            with_commas(natural),
            "-0.10".into(),
            with_commas(social),
            "0.05".into(),
        ]
    }
}

/// Grand-total row built from the given prefectures
pub fn total_row(prefectures: &[Prefecture<'_>]) -> Vec<String> {
    let male: i64 = prefectures.iter().map(|p| p.male).sum();
    let female: i64 = prefectures.iter().map(|p| p.female).sum();
    let mut total = Prefecture::new("00", "合計", male, female, -0.3);
    total.births = prefectures.iter().map(|p| p.births).sum();
    total.deaths = prefectures.iter().map(|p| p.deaths).sum();
    total.cells()
}

/// Population-change file contents: 5 preamble rows, a header, then `rows`
pub fn population_csv(rows: &[Vec<String>]) -> String {
    let header = vec!["団体コード"; rows.first().map_or(24, Vec::len)];
    csv_lines(5, &header, rows)
}

/// One row of an age-distribution file
pub fn age_row(prefecture: &str, sex: &str, brackets: &[u64]) -> Vec<String> {
    let total: u64 = brackets.iter().sum();
    let mut row = vec![
        "00000".to_string(),
        prefecture.to_string(),
        sex.to_string(),
        with_commas(total as i64),
    ];
    row.extend(brackets.iter().map(|b| with_commas(*b as i64)));
    row
}

/// Age-distribution file contents: 2 preamble rows, a header, then `rows`
pub fn age_csv(rows: &[Vec<String>]) -> String {
    let header = vec!["年齢"; rows.first().map_or(25, Vec::len)];
    csv_lines(2, &header, rows)
}

/// Temporary data directory with a default configuration pointing at it
pub struct Fixture {
    pub dir: TempDir,
    pub config: DashboardConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = DashboardConfig::with_data_dir(dir.path());
        Self { dir, config }
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
        fs::write(path, contents).expect("write fixture");
    }

    pub fn write_population(&self, rows: &[Vec<String>]) {
        Self::write(&self.config.resolved_population_path(), &population_csv(rows));
    }

    pub fn write_population_raw(&self, contents: &str) {
        Self::write(&self.config.resolved_population_path(), contents);
    }

    pub fn write_age(&self, year: u16, rows: &[Vec<String>]) {
        Self::write(&self.config.resolved_age_path(year), &age_csv(rows));
    }

    /// National male, female and both-sexes rows for `year`
    pub fn write_full_age(&self, year: u16, scale: u64) {
        let male = bracket_values(scale);
        let female = bracket_values(scale + 1);
        let both: Vec<u64> = male.iter().zip(&female).map(|(m, f)| m + f).collect();
        self.write_age(
            year,
            &[
                age_row("合計", "計", &both),
                age_row("合計", "男", &male),
                age_row("合計", "女", &female),
                age_row("北海道", "計", &bracket_values(1)),
            ],
        );
    }
}

/// A handful of prefectures with distinct change rates
pub fn sample_prefectures() -> Vec<Prefecture<'static>> {
    vec![
        Prefecture::new("01", "北海道", 2_400_000, 2_700_000, -0.92),
        Prefecture::new("04", "宮城県", 1_100_000, 1_150_000, -0.45),
        Prefecture::new("13", "東京都", 7_000_000, 7_200_000, 0.34),
        Prefecture::new("14", "神奈川県", 4_600_000, 4_630_000, 0.01),
        Prefecture::new("23", "愛知県", 3_700_000, 3_750_000, -0.20),
        Prefecture::new("27", "大阪府", 4_200_000, 4_550_000, -0.33),
        Prefecture::new("40", "福岡県", 2_400_000, 2_700_000, -0.11),
        Prefecture::new("47", "沖縄県", 730_000, 740_000, 0.09),
    ]
}

/// Raw rows of [`sample_prefectures`] followed by the grand-total row
pub fn sample_rows() -> Vec<Vec<String>> {
    let prefectures = sample_prefectures();
    let mut rows: Vec<Vec<String>> = prefectures.iter().map(Prefecture::cells).collect();
    rows.push(total_row(&prefectures));
    rows
}
