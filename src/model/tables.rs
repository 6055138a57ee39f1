use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

/// Hourly rate per position. Entry order is preserved so the position
/// dropdown renders in configured order.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<(String, f64)>,
}

impl RateTable {
    pub fn new(entries: Vec<(String, f64)>) -> Result<Self> {
        if entries.is_empty() {
            bail!("rate table must contain at least one position");
        }
        for (i, (position, rate)) in entries.iter().enumerate() {
            if position.trim().is_empty() {
                bail!("rate table contains an empty position name");
            }
            if !rate.is_finite() || *rate <= 0.0 {
                bail!("rate for position '{}' must be a positive number", position);
            }
            if entries[..i].iter().any(|(p, _)| p == position) {
                bail!("duplicate position '{}' in rate table", position);
            }
        }
        Ok(Self { entries })
    }

    pub fn rate_for(&self, position: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p == position)
            .map(|(_, rate)| *rate)
    }

    pub fn contains(&self, position: &str) -> bool {
        self.rate_for(position).is_some()
    }

    pub fn positions(&self) -> Vec<String> {
        self.entries.iter().map(|(p, _)| p.clone()).collect()
    }
}

/// Threshold => rate pairs. The highest qualifying threshold wins, not
/// cumulative brackets. Kept sorted descending so every lookup is a
/// single forward scan.
#[derive(Debug, Clone)]
pub struct TieredTable {
    // sorted descending by threshold
    tiers: Vec<(f64, f64)>,
}

impl TieredTable {
    pub fn new(mut tiers: Vec<(f64, f64)>) -> Result<Self> {
        for (threshold, rate) in &tiers {
            if !threshold.is_finite() || *threshold < 0.0 {
                bail!("tier threshold {} must be non-negative", threshold);
            }
            if !rate.is_finite() {
                bail!("tier rate for threshold {} is not a number", threshold);
            }
        }
        tiers.sort_by(|a, b| b.0.partial_cmp(&a.0).expect("finite thresholds"));
        if tiers.windows(2).any(|w| w[0].0 == w[1].0) {
            bail!("duplicate tier thresholds");
        }
        let has_base = matches!(tiers.last(), Some(&(t, r)) if t == 0.0 && r == 0.0);
        if !has_base {
            bail!("tiered table must contain the base entry (threshold 0, rate 0)");
        }
        Ok(Self { tiers })
    }

    /// Rate of the largest threshold <= gross. The base entry guarantees
    /// a match for any gross >= 0.
    pub fn rate_for(&self, gross: f64) -> f64 {
        self.tiers
            .iter()
            .find(|(threshold, _)| gross >= *threshold)
            .map(|(_, rate)| *rate)
            .unwrap_or(0.0)
    }
}

/// Static configuration for the calculator, loaded once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PayrollTables {
    pub rates: RateTable,
    pub bonus: TieredTable,
    pub tax: TieredTable,
}

#[derive(Deserialize)]
struct TablesFile {
    rates: Vec<(String, f64)>,
    bonus: Vec<(f64, f64)>,
    tax: Vec<(f64, f64)>,
}

static BUILTIN: Lazy<PayrollTables> = Lazy::new(|| {
    PayrollTables::from_parts(
        vec![
            ("Manager".to_string(), 500.0),
            ("Supervisor".to_string(), 400.0),
            ("Employee".to_string(), 300.0),
        ],
        vec![
            (0.0, 0.0),
            (3000.0, 0.15),
            (5000.0, 0.20),
            (10000.0, 0.25),
            (15000.0, 0.30),
        ],
        vec![
            (0.0, 0.0),
            (2000.0, 0.18),
            (4000.0, 0.23),
            (8000.0, 0.25),
            (15000.0, 0.32),
        ],
    )
    .expect("built-in payroll tables are valid")
});

impl PayrollTables {
    fn from_parts(
        rates: Vec<(String, f64)>,
        bonus: Vec<(f64, f64)>,
        tax: Vec<(f64, f64)>,
    ) -> Result<Self> {
        Ok(Self {
            rates: RateTable::new(rates).context("rate table")?,
            bonus: TieredTable::new(bonus).context("bonus table")?,
            tax: TieredTable::new(tax).context("tax table")?,
        })
    }

    pub fn builtin() -> &'static PayrollTables {
        &BUILTIN
    }

    /// Loads tables from `path` when configured, otherwise falls back to
    /// the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<PayrollTables> {
        match path {
            Some(path) => Self::from_file(Path::new(path))
                .with_context(|| format!("invalid payroll tables in {}", path)),
            None => Ok(Self::builtin().clone()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: TablesFile = serde_json::from_str(&raw)?;
        Self::from_parts(file.rates, file.bonus, file.tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bonus_tiers() -> Vec<(f64, f64)> {
        vec![
            (0.0, 0.0),
            (3000.0, 0.15),
            (5000.0, 0.20),
            (10000.0, 0.25),
            (15000.0, 0.30),
        ]
    }

    #[test]
    fn rate_for_picks_highest_qualifying_threshold() {
        let table = TieredTable::new(bonus_tiers()).unwrap();
        assert_eq!(table.rate_for(0.0), 0.0);
        assert_eq!(table.rate_for(2999.99), 0.0);
        assert_eq!(table.rate_for(3000.0), 0.15);
        // exact boundary: 5000 qualifies for the 5000 tier, not the 3000 one
        assert_eq!(table.rate_for(5000.0), 0.20);
        assert_eq!(table.rate_for(14999.99), 0.25);
        assert_eq!(table.rate_for(1_000_000.0), 0.30);
    }

    #[test]
    fn base_entry_is_required() {
        assert!(TieredTable::new(vec![(3000.0, 0.15)]).is_err());
        assert!(TieredTable::new(vec![(0.0, 0.1), (3000.0, 0.15)]).is_err());
        assert!(TieredTable::new(vec![(0.0, 0.0)]).is_ok());
    }

    #[test]
    fn duplicate_thresholds_are_rejected() {
        let result = TieredTable::new(vec![(0.0, 0.0), (3000.0, 0.15), (3000.0, 0.20)]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        assert!(TieredTable::new(vec![(0.0, 0.0), (-1.0, 0.15)]).is_err());
    }

    #[test]
    fn rate_table_lookup_and_order() {
        let table = &PayrollTables::builtin().rates;
        assert_eq!(table.rate_for("Manager"), Some(500.0));
        assert_eq!(table.rate_for("Supervisor"), Some(400.0));
        assert_eq!(table.rate_for("Intern"), None);
        assert!(table.contains("Employee"));
        assert_eq!(table.positions(), vec!["Manager", "Supervisor", "Employee"]);
    }

    #[test]
    fn rate_table_rejects_bad_entries() {
        assert!(RateTable::new(vec![]).is_err());
        assert!(RateTable::new(vec![("".to_string(), 100.0)]).is_err());
        assert!(RateTable::new(vec![("Manager".to_string(), 0.0)]).is_err());
        assert!(RateTable::new(vec![("Manager".to_string(), -5.0)]).is_err());
        assert!(
            RateTable::new(vec![
                ("Manager".to_string(), 500.0),
                ("Manager".to_string(), 400.0),
            ])
            .is_err()
        );
    }

    #[test]
    fn tables_parse_from_json() {
        let raw = r#"{
            "rates": [["Manager", 500.0], ["Clerk", 250.0]],
            "bonus": [[0.0, 0.0], [1000.0, 0.1]],
            "tax": [[0.0, 0.0], [2000.0, 0.2]]
        }"#;
        let file: TablesFile = serde_json::from_str(raw).unwrap();
        let tables = PayrollTables::from_parts(file.rates, file.bonus, file.tax).unwrap();
        assert_eq!(tables.rates.rate_for("Clerk"), Some(250.0));
        assert_eq!(tables.bonus.rate_for(1500.0), 0.1);
        assert_eq!(tables.tax.rate_for(1500.0), 0.0);
    }

    proptest! {
        #[test]
        fn applicable_rate_matches_brute_force(gross in 0.0f64..100_000.0) {
            let tiers = bonus_tiers();
            let table = TieredTable::new(tiers.clone()).unwrap();
            let expected = tiers
                .iter()
                .filter(|(threshold, _)| gross >= *threshold)
                .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
                .map(|(_, rate)| *rate)
                .unwrap();
            prop_assert_eq!(table.rate_for(gross), expected);
        }
    }
}
