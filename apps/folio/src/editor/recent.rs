use crate::gateway::GatewayError;
use crate::models::portfolio::PortfolioSummary;

const MAX_SKILLS_SHOWN: usize = 5;

/// One line-item of the "recently saved" list, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCard {
    pub name: String,
    pub title: String,
    /// Up to five skills joined by `, `, with `…` when more exist. `None`
    /// when the portfolio lists no skills.
    pub skills: Option<String>,
}

impl From<&PortfolioSummary> for RecentCard {
    fn from(summary: &PortfolioSummary) -> Self {
        let name = summary
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Unnamed")
            .to_string();

        let skills = if summary.skills.is_empty() {
            None
        } else {
            let shown = summary
                .skills
                .iter()
                .take(MAX_SKILLS_SHOWN)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let more = if summary.skills.len() > MAX_SKILLS_SHOWN { "…" } else { "" };
            Some(format!("{shown}{more}"))
        };

        Self {
            name,
            title: summary.title.clone().unwrap_or_default(),
            skills,
        }
    }
}

/// Best-effort list of recently saved portfolios.
#[derive(Debug, Clone, Default)]
pub struct RecentList {
    loading: bool,
    cards: Vec<RecentCard>,
}

impl RecentList {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Applies a fetch result. Failures of any kind leave an empty list.
    pub fn finish(&mut self, result: Result<Vec<PortfolioSummary>, GatewayError>) {
        self.loading = false;
        self.cards = match result {
            Ok(items) => items.iter().map(RecentCard::from).collect(),
            Err(e) => {
                tracing::debug!("Recent portfolios unavailable: {e}");
                Vec::new()
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cards(&self) -> &[RecentCard] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: Option<&str>, skills: &[&str]) -> PortfolioSummary {
        PortfolioSummary {
            name: name.map(str::to_string),
            title: Some("Engineer".to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_card_truncates_after_five_skills() {
        let card = RecentCard::from(&summary(Some("Jane"), &["a", "b", "c", "d", "e", "f"]));
        assert_eq!(card.skills.as_deref(), Some("a, b, c, d, e…"));
    }

    #[test]
    fn test_card_with_five_skills_has_no_indicator() {
        let card = RecentCard::from(&summary(Some("Jane"), &["a", "b", "c", "d", "e"]));
        assert_eq!(card.skills.as_deref(), Some("a, b, c, d, e"));
    }

    #[test]
    fn test_card_defaults() {
        let card = RecentCard::from(&PortfolioSummary::default());
        assert_eq!(card.name, "Unnamed");
        assert_eq!(card.title, "");
        assert_eq!(card.skills, None);
        assert_eq!(RecentCard::from(&summary(Some(""), &[])).name, "Unnamed");
    }

    #[test]
    fn test_failed_fetch_degrades_to_empty() {
        let mut recent = RecentList::default();
        recent.finish(Ok(vec![summary(Some("Jane"), &[])]));
        assert_eq!(recent.cards().len(), 1);

        recent.begin();
        assert!(recent.is_loading());
        recent.finish(Err(GatewayError::Status {
            status: 503,
            body: String::new(),
        }));
        assert!(!recent.is_loading());
        assert!(recent.cards().is_empty());
    }
}
