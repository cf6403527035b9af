use crate::credibility::CredibilityLabel;
use crate::models::{title_case, Headline, TopicArticle};
use crate::report::ArticleReport;
use askama::Template;
use market_rs::analysis::IndicatorHistory;
use market_rs::snapshot::{MarketSnapshot, SnapshotEntry};

const MISSING: &str = "N/A";

/// Escape a JSON payload for embedding inside a `<script>` element
fn script_safe_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// One market row, pre-formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    pub name: String,
    pub ticker: String,
    pub price: String,
    pub change: String,
    pub change_pct: String,
    /// CSS class: "up", "down", "flat" or "missing"
    pub direction: &'static str,
    /// Comma-separated recent closes for the sparkline
    pub history: String,
    /// Percent-encoded, safe to emit unescaped
    pub analysis_href: String,
}

impl MarketRow {
    pub fn from_entry(entry: &SnapshotEntry) -> Self {
        let direction = match entry.change() {
            Some(c) if c > 0.0 => "up",
            Some(c) if c < 0.0 => "down",
            Some(_) => "flat",
            None => "missing",
        };

        Self {
            name: entry.name.clone(),
            ticker: entry.ticker.clone(),
            price: entry
                .price()
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| MISSING.to_string()),
            change: entry
                .change()
                .map(|c| format!("{:+.2}", c))
                .unwrap_or_else(|| MISSING.to_string()),
            change_pct: entry
                .change_pct()
                .map(|p| format!("{:+.2}%", p))
                .unwrap_or_else(|| MISSING.to_string()),
            direction,
            history: entry
                .history()
                .iter()
                .map(|c| format!("{:.2}", c))
                .collect::<Vec<_>>()
                .join(","),
            analysis_href: format!("/markets/analysis/{}", urlencoding::encode(&entry.ticker)),
        }
    }

    pub fn rows(snapshot: &MarketSnapshot) -> Vec<Self> {
        snapshot.iter().map(Self::from_entry).collect()
    }
}

/// Link to a topic page
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLink {
    pub label: String,
    /// Percent-encoded, safe to emit unescaped
    pub href: String,
}

impl TrendLink {
    pub fn new(topic: &str) -> Self {
        Self {
            label: topic.to_string(),
            href: format!("/news/{}", urlencoding::encode(topic)),
        }
    }
}

/// Article report, pre-formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub url: String,
    pub title: String,
    pub authors: String,
    pub publish_date: String,
    pub summary: String,
    pub top_image: Option<String>,
    pub mood: String,
    pub score: String,
    pub verdict: String,
    /// CSS class for the verdict badge
    pub verdict_class: &'static str,
}

impl From<&ArticleReport> for ReportView {
    fn from(report: &ArticleReport) -> Self {
        let label = report.credibility.label;
        Self {
            url: report.url.clone(),
            title: report.title.clone(),
            authors: report.authors.clone(),
            publish_date: report.publish_date.clone(),
            summary: report.summary.clone(),
            top_image: report.top_image.clone(),
            mood: report.sentiment.to_string(),
            score: format!("{:.1}", report.credibility.score),
            verdict: label.badge().to_string(),
            verdict_class: match label {
                CredibilityLabel::LikelyReal => "real",
                CredibilityLabel::Uncertain => "uncertain",
                CredibilityLabel::LikelyFake => "fake",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "index.html.jinja", escape = "html")]
pub struct IndexTemplate {
    pub headlines: Vec<Headline>,
    pub trends: Vec<TrendLink>,
    pub markets: Vec<MarketRow>,
    pub notice: Option<String>,
    pub report: Option<ReportView>,
    pub submitted_url: String,
}

impl IndexTemplate {
    pub fn new(headlines: Vec<Headline>, trends: Vec<String>, snapshot: &MarketSnapshot) -> Self {
        Self {
            headlines,
            trends: trends.iter().map(|t| TrendLink::new(t)).collect(),
            markets: MarketRow::rows(snapshot),
            notice: None,
            report: None,
            submitted_url: String::new(),
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn with_report(mut self, report: &ArticleReport) -> Self {
        self.submitted_url = report.url.clone();
        self.report = Some(ReportView::from(report));
        self
    }
}

#[derive(Template)]
#[template(path = "news.html.jinja", escape = "html")]
pub struct NewsTemplate {
    pub topic: String,
    pub heading: String,
    pub articles: Vec<TopicArticle>,
}

impl NewsTemplate {
    pub fn new(topic: &str, articles: Vec<TopicArticle>) -> Self {
        Self {
            topic: topic.to_string(),
            heading: title_case(topic),
            articles,
        }
    }
}

#[derive(Template)]
#[template(path = "markets.html.jinja", escape = "html")]
pub struct MarketsTemplate {
    pub rows: Vec<MarketRow>,
}

impl MarketsTemplate {
    pub fn new(snapshot: &MarketSnapshot) -> Self {
        Self {
            rows: MarketRow::rows(snapshot),
        }
    }
}

#[derive(Template)]
#[template(path = "analysis.html.jinja", escape = "html")]
pub struct AnalysisTemplate {
    pub name: String,
    pub ticker: String,
    pub range: String,
    pub rsi_period: usize,
    pub has_data: bool,
    pub latest_close: String,
    pub latest_rsi: String,
    /// `{dates, closes, volume, rsi}` for the chart script
    pub chart_json: String,
}

impl AnalysisTemplate {
    pub fn new(
        name: &str,
        ticker: &str,
        range: &str,
        rsi_period: usize,
        history: &IndicatorHistory,
    ) -> Result<Self, serde_json::Error> {
        let latest_close = history
            .closes
            .last()
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| MISSING.to_string());
        let latest_rsi = history
            .rsi
            .last()
            .copied()
            .flatten()
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| MISSING.to_string());

        Ok(Self {
            name: name.to_string(),
            ticker: ticker.to_string(),
            range: range.to_string(),
            rsi_period,
            has_data: !history.is_empty(),
            latest_close,
            latest_rsi,
            chart_json: script_safe_json(history)?,
        })
    }
}
