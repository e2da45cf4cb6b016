use std::fmt;
use std::fmt::Formatter;
use std::fs;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use crate::calendar::local_date;
use crate::errors::{ConfigError, PriceError};
use crate::models::rate_table::RateTable;
use crate::money::Money;
use crate::readings::{sum_values, ValueWithTimestamp};

/// Tariff table shipped with the crate
const DEFAULT_RATES: &str = include_str!("../config/rates.toml");

/// Metered categories that carry a price
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gas,
    Stroom,
    Water,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Category::Gas    => write!(f, "gas"),
            Category::Stroom => write!(f, "stroom"),
            Category::Water  => write!(f, "water"),
        }
    }
}

impl FromStr for Category {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gas" => Ok(Category::Gas),
            "stroom" => Ok(Category::Stroom),
            "water" => Ok(Category::Water),
            _ => Err(ConfigError::Rates(format!("unknown category '{}'", s))),
        }
    }
}

/// Gas and electricity prices valid over `[valid_from, valid_until)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyRateForDateRange {
    pub gas: Money,
    pub stroom: Money,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Water price valid over `[valid_from, valid_until)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterRateForDateRange {
    pub price: Money,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Quantity and cost of a batch of readings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostSummary {
    pub category: Category,
    pub units: f64,
    pub costs: Money,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for CostSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let unit = match self.category {
            Category::Stroom => "kWh",
            Category::Gas | Category::Water => "m3",
        };
        write!(f, "{}: {:.3} {} = {}", self.category, self.units, unit, self.costs)
    }
}

/// Looks up tariffs by date and prices meter readings
pub struct PriceCalculator {
    tz: Tz,
    energy_rates: Vec<EnergyRateForDateRange>,
    water_rates: Vec<WaterRateForDateRange>,
}

impl PriceCalculator {
    /// Returns a calculator using the tariff table shipped with the crate
    ///
    /// # Arguments
    ///
    /// * 'tz' - zone in which the tariff dates apply
    pub fn new(tz: Tz) -> Result<PriceCalculator, ConfigError> {
        Self::from_toml(tz, DEFAULT_RATES)
    }

    /// Returns a calculator using a tariff table from file
    ///
    /// # Arguments
    ///
    /// * 'tz' - zone in which the tariff dates apply
    /// * 'rates_file' - path to the tariff table
    pub fn from_file(tz: Tz, rates_file: &str) -> Result<PriceCalculator, ConfigError> {
        let toml = fs::read_to_string(rates_file)?;
        Self::from_toml(tz, &toml)
    }

    pub fn from_toml(tz: Tz, toml: &str) -> Result<PriceCalculator, ConfigError> {
        let table: RateTable = toml::from_str(toml)?;

        let energy_rates = table.energy.iter()
            .map(|r| EnergyRateForDateRange {
                gas: Money::new(r.gas),
                stroom: Money::new(r.stroom),
                valid_from: r.valid_from,
                valid_until: r.valid_until,
            })
            .collect();
        let water_rates = table.water.iter()
            .map(|r| WaterRateForDateRange {
                price: Money::new(r.price),
                valid_from: r.valid_from,
                valid_until: r.valid_until,
            })
            .collect();

        Ok(Self::with_rates(tz, energy_rates, water_rates))
    }

    pub fn with_rates(tz: Tz, energy_rates: Vec<EnergyRateForDateRange>, water_rates: Vec<WaterRateForDateRange>) -> PriceCalculator {
        PriceCalculator { tz, energy_rates, water_rates }
    }

    /// Returns the price per unit for the category at the given date
    ///
    /// # Arguments
    ///
    /// * 'category' - the metered category
    /// * 'date' - the moment of consumption
    pub fn unit_price(&self, category: Category, date: DateTime<Utc>) -> Result<Money, PriceError> {
        let day = local_date(&self.tz, date);
        let missing = PriceError::MissingRate { category, date: day };

        match category {
            Category::Water => self.water_rates.iter()
                .find(|r| r.valid_from <= day && day < r.valid_until)
                .map(|r| r.price)
                .ok_or(missing),
            Category::Gas | Category::Stroom => self.energy_rates.iter()
                .find(|r| r.valid_from <= day && day < r.valid_until)
                .map(|r| if category == Category::Gas { r.gas } else { r.stroom })
                .ok_or(missing),
        }
    }

    /// Prices units at the tariff in effect at the given date
    ///
    /// # Arguments
    ///
    /// * 'units' - consumed units
    /// * 'category' - the metered category
    /// * 'date' - the moment of consumption
    pub fn try_costs_for(&self, units: f64, category: Category, date: DateTime<Utc>) -> Result<Money, PriceError> {
        Ok(self.unit_price(category, date)?.multiply(units))
    }

    /// As try_costs_for, but a missing tariff is logged and priced at zero
    ///
    /// # Arguments
    ///
    /// * 'units' - consumed units
    /// * 'category' - the metered category
    /// * 'date' - the moment of consumption
    pub fn costs_for(&self, units: f64, category: Category, date: DateTime<Utc>) -> Money {
        self.try_costs_for(units, category, date).unwrap_or_else(|e| {
            error!("{}, using zero price", e);
            Money::zero()
        })
    }

    /// Prices a batch of readings.
    ///
    /// Tariffs change a handful of times over several years, so when all readings fall on
    /// the same local day they are summed and priced once at the earliest timestamp.
    /// Otherwise every reading is priced at its own timestamp.
    ///
    /// # Arguments
    ///
    /// * 'readings' - readings sorted by time
    /// * 'category' - the metered category
    pub fn costs_for_multiple(&self, readings: &[ValueWithTimestamp], category: Category) -> Money {
        let (Some(first), Some(last)) = (readings.first(), readings.last()) else {
            return Money::zero();
        };

        let earliest = readings.iter().map(|r| r.timestamp).min().unwrap_or(first.timestamp);
        let latest = readings.iter().map(|r| r.timestamp).max().unwrap_or(last.timestamp);

        if local_date(&self.tz, earliest) == local_date(&self.tz, latest) {
            debug!("pricing {} {} readings in one go", readings.len(), category);
            self.costs_for(sum_values(readings), category, earliest)
        } else {
            readings.iter()
                .map(|r| self.costs_for(r.value, category, r.timestamp))
                .sum()
        }
    }

    /// Returns units and costs of a batch of readings
    ///
    /// # Arguments
    ///
    /// * 'readings' - readings sorted by time
    /// * 'category' - the metered category
    pub fn cost_summary(&self, readings: &[ValueWithTimestamp], category: Category) -> CostSummary {
        CostSummary {
            category,
            units: sum_values(readings),
            costs: self.costs_for_multiple(readings, category),
        }
    }
}
