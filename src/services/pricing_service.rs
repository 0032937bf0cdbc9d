use crate::services::reservation_service::BookingError;

pub struct PricingService;

impl PricingService {
    /// Both quantities must be at least 1. Guests are checked before rooms,
    /// and quantities are always checked before dates.
    pub fn validate_quantities(guests: u32, rooms: u32) -> Result<(), BookingError> {
        if guests < 1 {
            return Err(BookingError::InvalidQuantity("guests"));
        }
        if rooms < 1 {
            return Err(BookingError::InvalidQuantity("rooms"));
        }
        Ok(())
    }

    /// Total for a stay in whole currency units. No taxes, fees, or
    /// conversion.
    pub fn total_cost(nights: i64, price_per_night: i64, rooms: u32) -> i64 {
        nights * price_per_night * i64::from(rooms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_nights_times_rate_times_rooms() {
        assert_eq!(PricingService::total_cost(3, 1000, 2), 6000);
        assert_eq!(PricingService::total_cost(1, 850, 1), 850);
        assert_eq!(PricingService::total_cost(7, 1200, 3), 25200);
    }

    #[test]
    fn test_zero_quantities_are_rejected() {
        assert!(matches!(
            PricingService::validate_quantities(0, 2),
            Err(BookingError::InvalidQuantity("guests"))
        ));
        assert!(matches!(
            PricingService::validate_quantities(2, 0),
            Err(BookingError::InvalidQuantity("rooms"))
        ));
        // Guests are reported first when both are bad
        assert!(matches!(
            PricingService::validate_quantities(0, 0),
            Err(BookingError::InvalidQuantity("guests"))
        ));
        assert!(PricingService::validate_quantities(1, 1).is_ok());
    }
}
