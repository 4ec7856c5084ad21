use earnings_config::AppConfig;
use earnings_nlp::ReportOptions;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn report_options(&self) -> ReportOptions {
        let r = &self.config.report;
        ReportOptions {
            max_numbers: r.max_numbers,
            max_guidance: r.max_guidance,
            summary_sentences: r.summary_sentences,
        }
    }
}
