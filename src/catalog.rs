//! Amount Catalog
//!
//! Fixed purchasable denominations with their destination-currency credit
//! values. The USD/AFN pairing is a fixed table, not a live exchange rate.

/// One purchasable denomination.
///
/// `usd` is the source-currency amount charged to the sender, `afn` the
/// destination-currency credit delivered to the recipient. The pairing is
/// one-to-one and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountOption {
    pub usd: u32,
    pub afn: u32,
}

/// The fixed set of denominations offered at checkout.
#[derive(Debug, Clone)]
pub struct AmountCatalog {
    options: Vec<AmountOption>,
}

impl AmountCatalog {
    pub fn new(options: Vec<AmountOption>) -> Self {
        Self { options }
    }

    /// The standard five denominations.
    pub fn standard() -> Self {
        Self::new(vec![
            AmountOption { usd: 5, afn: 350 },
            AmountOption { usd: 10, afn: 700 },
            AmountOption { usd: 20, afn: 1400 },
            AmountOption { usd: 50, afn: 3500 },
            AmountOption { usd: 100, afn: 7000 },
        ])
    }

    /// Look up a denomination by its source-currency amount.
    pub fn get(&self, usd: u32) -> Option<AmountOption> {
        self.options.iter().copied().find(|a| a.usd == usd)
    }

    /// All denominations in display order.
    pub fn options(&self) -> &[AmountOption] {
        &self.options
    }
}

impl Default for AmountCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_pairings() {
        let catalog = AmountCatalog::standard();
        assert_eq!(catalog.get(20).unwrap().afn, 1400);
        assert_eq!(catalog.get(50).unwrap().afn, 3500);
        assert_eq!(catalog.get(5).unwrap().afn, 350);
        assert_eq!(catalog.get(100).unwrap().afn, 7000);
    }

    #[test]
    fn test_unknown_denomination() {
        let catalog = AmountCatalog::standard();
        assert!(catalog.get(25).is_none());
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_display_order() {
        let catalog = AmountCatalog::standard();
        let usd: Vec<_> = catalog.options().iter().map(|a| a.usd).collect();
        assert_eq!(usd, vec![5, 10, 20, 50, 100]);
    }
}
