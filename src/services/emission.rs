// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission model: maps one day's activity inputs to an estimated CO₂ mass.
//!
//! Coefficients are fixed constants. Travel and electricity terms scale with
//! the submitted quantity; the diet term is a flat per-day add-on. Categorical
//! inputs that are not recognised contribute nothing rather than failing.

use serde::Serialize;

/// kg CO₂ per kWh of electricity (single global grid factor).
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.82;

/// Known travel modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bus,
    Bike,
    Cycle,
    Walk,
    None,
}

impl TravelMode {
    pub const ALL: [TravelMode; 6] = [
        TravelMode::Car,
        TravelMode::Bus,
        TravelMode::Bike,
        TravelMode::Cycle,
        TravelMode::Walk,
        TravelMode::None,
    ];

    /// Case-insensitive parse of a submitted mode.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "car" => Some(TravelMode::Car),
            "bus" => Some(TravelMode::Bus),
            "bike" => Some(TravelMode::Bike),
            "cycle" => Some(TravelMode::Cycle),
            "walk" => Some(TravelMode::Walk),
            "none" => Some(TravelMode::None),
            _ => None,
        }
    }

    /// Canonical form label.
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bus => "bus",
            TravelMode::Bike => "bike",
            TravelMode::Cycle => "cycle",
            TravelMode::Walk => "walk",
            TravelMode::None => "none",
        }
    }

    /// kg CO₂ per km travelled.
    pub fn kg_per_km(self) -> f64 {
        match self {
            TravelMode::Car => 0.12,
            TravelMode::Bus => 0.07,
            TravelMode::Bike => 0.05,
            TravelMode::Cycle | TravelMode::Walk | TravelMode::None => 0.0,
        }
    }
}

/// Known diet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Veg,
    NonVeg,
}

impl DietType {
    /// Case-insensitive parse; `non-veg` is accepted as an alias of `nonveg`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "veg" => Some(DietType::Veg),
            "nonveg" | "non-veg" => Some(DietType::NonVeg),
            _ => None,
        }
    }

    /// Flat kg CO₂ for a day on this diet.
    pub fn kg_per_day(self) -> f64 {
        match self {
            DietType::Veg => 1.7,
            DietType::NonVeg => 3.5,
        }
    }
}

/// Travel coefficient with zero for unknown modes.
pub fn travel_coefficient(mode: Option<TravelMode>) -> f64 {
    mode.map_or(0.0, TravelMode::kg_per_km)
}

/// Diet add-on with zero for unknown diets.
pub fn diet_coefficient(diet: Option<DietType>) -> f64 {
    diet.map_or(0.0, DietType::kg_per_day)
}

/// Estimated kg CO₂ for one activity record. Not rounded.
pub fn compute_footprint(
    travel_mode: &str,
    travel_km: f64,
    electricity_kwh: f64,
    diet_type: &str,
) -> f64 {
    let travel = travel_coefficient(TravelMode::from_label(travel_mode)) * travel_km;
    let power = ELECTRICITY_KG_PER_KWH * electricity_kwh;
    let diet = diet_coefficient(DietType::from_label(diet_type));
    travel + power + diet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_car_and_veg() {
        assert!(approx(compute_footprint("car", 10.0, 0.0, "veg"), 2.9));
    }

    #[test]
    fn test_cycle_is_free() {
        assert!(approx(compute_footprint("cycle", 100.0, 0.0, "veg"), 1.7));
    }

    #[test]
    fn test_unknown_categories_contribute_zero() {
        assert!(approx(
            compute_footprint("unknownmode", 10.0, 5.0, "unknowndiet"),
            4.1
        ));
        assert!(approx(compute_footprint("", 10.0, 0.0, ""), 0.0));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(approx(
            compute_footprint("CAR", 10.0, 0.0, "Veg"),
            compute_footprint("car", 10.0, 0.0, "veg")
        ));
        assert_eq!(DietType::from_label("Non-Veg"), Some(DietType::NonVeg));
        assert_eq!(TravelMode::from_label(" Bus "), Some(TravelMode::Bus));
    }

    #[test]
    fn test_labels_parse_back() {
        for mode in TravelMode::ALL {
            assert_eq!(TravelMode::from_label(mode.label()), Some(mode));
        }
    }

    #[test]
    fn test_all_terms_add_up() {
        // bus 20 km + 10 kWh + nonveg
        let expected = 0.07 * 20.0 + 0.82 * 10.0 + 3.5;
        assert!(approx(compute_footprint("bus", 20.0, 10.0, "nonveg"), expected));
    }

    #[test]
    fn test_non_negative_for_non_negative_inputs() {
        for mode in TravelMode::ALL {
            let label = mode.label();
            for diet in ["veg", "nonveg", "other"] {
                let value = compute_footprint(label, 12.5, 3.25, diet);
                assert!(value >= 0.0);
                assert_eq!(value, compute_footprint(label, 12.5, 3.25, diet));
            }
        }
    }

    #[test]
    fn test_coefficient_defaults() {
        assert_eq!(travel_coefficient(None), 0.0);
        assert_eq!(diet_coefficient(None), 0.0);
        assert_eq!(travel_coefficient(Some(TravelMode::Car)), 0.12);
    }
}
