/// A product tracked by the config file. `key` is the entry name under
/// `best_buy.skus_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedItem {
    pub key: String,
    pub sku: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub purchasable: bool,
    pub shipping_status: String,
    pub pickup_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub display_price: String,
    pub is_preorderable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items_checked: usize,
    pub actionable: usize,
    pub failed: usize,
    pub notified: bool,
}

impl RunSummary {
    pub fn has_actionable(&self) -> bool {
        self.actionable > 0
    }
}
