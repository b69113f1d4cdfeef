//! The aggregate report handed to the presentation layer, plus its
//! plain-text rendering.

use pricewatch_core::ScoredCandidate;

/// One competitor site's contribution to the report.
#[derive(Debug, Clone, PartialEq)]
pub enum CompetitorOutcome {
    /// Non-empty, score-ascending ResultSet.
    Found(Vec<ScoredCandidate>),
    /// The lookup ran but nothing cleared the relevance ladder.
    NotFound,
    /// The branch failed; carries the failure category name.
    Error(String),
}

/// The unit handed to the presentation layer: the primary product (possibly
/// a synthetic stand-in) plus one outcome per competitor site.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub primary_site: &'static str,
    pub primary: ScoredCandidate,
    pub competitors: Vec<(&'static str, CompetitorOutcome)>,
}

impl AggregateReport {
    /// Renders the report as display text: product heading, primary price,
    /// then one block per competitor.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        let product = &self.primary.candidate;
        let mut heading = product.title.clone();
        if let Some(article) = product.article.as_deref().filter(|a| !a.is_empty()) {
            heading.push_str(&format!(" ({article})"));
        }
        lines.push(heading);
        if !product.link.is_empty() {
            lines.push(product.link.clone());
        }
        lines.push(format!("{}: {}", self.primary_site, format_price(product.price)));

        lines.push(String::new());
        lines.push("Competitor prices:".to_owned());
        for (site, outcome) in &self.competitors {
            match outcome {
                CompetitorOutcome::Found(results) => {
                    lines.push(format!("* {site}:"));
                    for result in results {
                        let candidate = &result.candidate;
                        lines.push(format!(
                            "  - {}: {}",
                            candidate.title,
                            format_price(candidate.price)
                        ));
                        lines.push(format!("    {}", candidate.link));
                    }
                }
                CompetitorOutcome::NotFound => lines.push(format!("* {site}: not found")),
                CompetitorOutcome::Error(category) => {
                    lines.push(format!("* {site}: error ({category})"));
                }
            }
        }

        lines.join("\n")
    }
}

/// Whole rubles with space-separated thousands groups, or `"no data"` when
/// the price is absent.
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price else {
        return "no data".to_owned();
    };
    #[allow(clippy::cast_possible_truncation)]
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-{grouped} RUB")
    } else {
        format!("{grouped} RUB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pricewatch_core::Candidate;

    fn scored(title: &str, link: &str, price: Option<f64>, article: Option<&str>) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate {
                title: title.to_owned(),
                link: link.to_owned(),
                price,
                article: article.map(str::to_owned),
            },
            score: 1.0,
        }
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(Some(1_500.0)), "1 500 RUB");
        assert_eq!(format_price(Some(12_500.0)), "12 500 RUB");
        assert_eq!(format_price(Some(1_234_567.0)), "1 234 567 RUB");
        assert_eq!(format_price(Some(990.0)), "990 RUB");
    }

    #[test]
    fn format_price_rounds_kopecks() {
        assert_eq!(format_price(Some(1499.90)), "1 500 RUB");
    }

    #[test]
    fn format_price_absent() {
        assert_eq!(format_price(None), "no data");
    }

    #[test]
    fn render_full_report() {
        let report = AggregateReport {
            primary_site: "TehnikaPremium.ru",
            primary: scored(
                "Картридж Miele CM7",
                "https://tehnikapremium.ru/catalog/cm7/",
                Some(12500.0),
                Some("11206880"),
            ),
            competitors: vec![
                (
                    "Mieles.ru",
                    CompetitorOutcome::Found(vec![scored(
                        "Картридж CM7",
                        "https://mieles.ru/tproduct/1",
                        Some(11990.0),
                        None,
                    )]),
                ),
                ("Hausdorf.ru", CompetitorOutcome::NotFound),
                ("Miele-Unique.ru", CompetitorOutcome::Error("Http".to_owned())),
            ],
        };

        let text = report.render();
        assert!(text.starts_with("Картридж Miele CM7 (11206880)\n"));
        assert!(text.contains("TehnikaPremium.ru: 12 500 RUB"));
        assert!(text.contains("* Mieles.ru:\n  - Картридж CM7: 11 990 RUB"));
        assert!(text.contains("* Hausdorf.ru: not found"));
        assert!(text.contains("* Miele-Unique.ru: error (Http)"));
    }

    #[test]
    fn render_synthetic_primary_omits_link_line() {
        let report = AggregateReport {
            primary_site: "TehnikaPremium.ru",
            primary: scored("cm7", "", None, None),
            competitors: vec![],
        };
        let text = report.render();
        assert!(text.starts_with("cm7\nTehnikaPremium.ru: no data"));
    }
}
