use tracing::debug;

use crate::models::ServiceSelection;

/// Flat prices in UZS shown on the confirmation screen.
pub const DOCTOR_CONSULTATION_COST: u64 = 150_000;
pub const ANALYSIS_COST: u64 = 50_000;
pub const CHECKUP_COST: u64 = 450_000;

#[derive(Debug, Clone, Default)]
pub struct PricingService;

impl PricingService {
    pub fn new() -> Self {
        Self
    }

    /// Cost displayed after booking; fixed per service type.
    pub fn price_for(&self, service: ServiceSelection) -> u64 {
        let price = match service {
            ServiceSelection::Doctor => DOCTOR_CONSULTATION_COST,
            ServiceSelection::Analysis => ANALYSIS_COST,
            ServiceSelection::Checkup => CHECKUP_COST,
        };
        debug!("Price for {} booking: {} UZS", service, price);
        price
    }

    /// `150000` -> `"150 000"`
    pub fn format_cost(&self, cost: u64) -> String {
        let digits = cost.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_prices() {
        let service = PricingService::new();

        assert_eq!(service.price_for(ServiceSelection::Doctor), 150_000);
        assert_eq!(service.price_for(ServiceSelection::Analysis), 50_000);
        assert_eq!(service.price_for(ServiceSelection::Checkup), 450_000);
    }

    #[test]
    fn test_format_cost() {
        let service = PricingService::new();

        assert_eq!(service.format_cost(150_000), "150 000");
        assert_eq!(service.format_cost(1_250_000), "1 250 000");
        assert_eq!(service.format_cost(999), "999");
        assert_eq!(service.format_cost(0), "0");
    }
}
