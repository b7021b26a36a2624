use serde::{Deserialize, Serialize};

/// One selectable model in the comparison set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier as the host knows it.
    pub id: String,
    /// Human-readable name shown on the dashboard.
    pub label: String,
    /// Flat cost per 1000 tokens, in USD.
    pub cost_per_1k: f64,
}

impl ModelEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, cost_per_1k: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            cost_per_1k,
        }
    }

    /// Cost of a call that consumed `tokens` tokens in total.
    pub fn cost(&self, tokens: u32) -> f64 {
        f64::from(tokens) / 1000.0 * self.cost_per_1k
    }
}

/// The default comparison set with its flat per-1k-token pricing.
pub fn default_catalog() -> Vec<ModelEntry> {
    vec![
        ModelEntry::new("gpt-4o", "GPT-4o", 0.0075),
        ModelEntry::new("gpt-4o-mini", "GPT-4o mini", 0.00045),
        ModelEntry::new("gpt-4.1", "GPT-4.1", 0.005),
        ModelEntry::new("gpt-4.1-nano", "GPT-4.1 nano", 0.0003),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_with_token_count() {
        let entry = ModelEntry::new("m", "M", 0.5);
        assert_eq!(entry.cost(1000), 0.5);
        assert_eq!(entry.cost(0), 0.0);
        assert!((entry.cost(1500) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn default_catalog_has_unique_ids() {
        let catalog = default_catalog();
        assert!(!catalog.is_empty());
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
