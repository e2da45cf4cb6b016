use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct EnergyRateRecord {
    pub gas: f64,
    pub stroom: f64,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WaterRateRecord {
    pub price: f64,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Tariff file layout, prices are in euros per unit
#[derive(Deserialize, Debug)]
pub struct RateTable {
    pub energy: Vec<EnergyRateRecord>,
    pub water: Vec<WaterRateRecord>,
}
