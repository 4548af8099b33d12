use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::GrabError;
use crate::fetch::PageSource;
use crate::parser::{parse_cases, parse_opinions};
use crate::records::{to_batch, CaseRecord, OpinionRecord};
use crate::settings::Settings;
use crate::sink::{Table, TableSink};

/// Fetch a year's listing page and extract its cases.
pub async fn fetch_cases<S: PageSource + ?Sized>(
    source: &S,
    settings: &Settings,
    year: i32,
) -> Result<Vec<CaseRecord>, GrabError> {
    let url = settings.year_url(year);
    let html = source.get(&url).await?;
    let cases = parse_cases(&html).map_err(|e| GrabError::parse(&url, e))?;
    info!("Found {} cases for {}", cases.len(), year);
    Ok(cases)
}

/// Fetch one case detail page and extract its opinions.
pub async fn fetch_opinions<S: PageSource + ?Sized>(
    source: &S,
    case_url: &str,
) -> Result<Vec<OpinionRecord>, GrabError> {
    let html = source.get(case_url).await?;
    parse_opinions(case_url, &html).map_err(|e| GrabError::parse(case_url, e))
}

/// Random whole-second pause before each case detail request.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    max_secs: u64,
}

impl Pacer {
    pub fn new(max_secs: u64) -> Self {
        Self { max_secs }
    }

    /// Uniform over `0..=max_secs` seconds.
    pub fn next_delay(&self) -> Duration {
        Duration::from_secs(fastrand::u64(0..=self.max_secs))
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Sequences the listing and detail fetchers for one year.
pub struct Crawler<'a, S: ?Sized> {
    source: &'a S,
    settings: &'a Settings,
    pacer: Pacer,
}

impl<'a, S: PageSource + ?Sized> Crawler<'a, S> {
    pub fn new(source: &'a S, settings: &'a Settings) -> Self {
        Self {
            source,
            settings,
            pacer: Pacer::new(settings.max_pause_secs),
        }
    }

    /// Fetch the year's cases and write them as a single table.
    pub async fn run_cases(
        &self,
        year: i32,
        sink: &mut dyn TableSink,
    ) -> Result<Vec<CaseRecord>, GrabError> {
        let cases = fetch_cases(self.source, self.settings, year).await?;
        sink.write(Table::Cases, &to_batch(&cases)?)?;
        Ok(cases)
    }

    /// Write the cases table, then visit every case page in order and write
    /// all of their opinions as one table. `on_cases` runs as soon as the
    /// cases table is written. The first failure ends the run; the cases
    /// table stays written.
    pub async fn run_opinions<F>(
        &self,
        year: i32,
        sink: &mut dyn TableSink,
        on_cases: F,
    ) -> Result<(Vec<CaseRecord>, Vec<OpinionRecord>), GrabError>
    where
        F: FnOnce(&[CaseRecord]),
    {
        let cases = self.run_cases(year, sink).await?;
        on_cases(&cases);

        let pb = ProgressBar::new(cases.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        let mut opinions = Vec::new();
        for case in &cases {
            pb.set_message(case.case.clone());
            self.pacer.wait().await;
            let found = fetch_opinions(self.source, &case.url).await?;
            info!("{}: {} opinions", case.case, found.len());
            opinions.extend(found);
            pb.inc(1);
        }
        pb.finish_and_clear();

        sink.write(Table::Opinions, &to_batch(&opinions)?)?;
        Ok((cases, opinions))
    }
}

// ── Tests ──
