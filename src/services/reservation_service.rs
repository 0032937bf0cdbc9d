use std::sync::Arc;

use bson::{doc, oid::ObjectId, to_bson};
use chrono::Utc;
use mongodb::{Client, Collection};

use crate::db::mongo::DB_NAME;
use crate::middleware::auth::Claims;
use crate::models::account::User;
use crate::models::bookings::{Booking, BookingRequest, BookingStatus};
use crate::services::pricing_service::PricingService;
use crate::services::stay_dates::StayDates;

#[derive(Debug)]
pub enum BookingError {
    Unauthenticated,
    InvalidQuantity(&'static str),
    InvalidRange,
    IndexOutOfRange,
    AccountNotFound,
    NotCancellable,
    Persistence(String),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Unauthenticated => write!(f, "Sign in to manage bookings"),
            BookingError::InvalidQuantity(field) => {
                write!(f, "Number of {} must be at least 1", field)
            }
            BookingError::InvalidRange => {
                write!(f, "Check-out date must be after check-in date")
            }
            BookingError::IndexOutOfRange => write!(f, "No booking at that position"),
            BookingError::AccountNotFound => write!(f, "User profile not found"),
            BookingError::NotCancellable => {
                write!(f, "Only confirmed bookings can be cancelled")
            }
            BookingError::Persistence(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for BookingError {}

/// Identity of the account a ledger operation acts on. Built from verified
/// token claims at the route boundary and passed into every service call;
/// nothing below this reads ambient session state.
#[derive(Debug, Clone)]
pub struct AccountContext {
    pub user_id: ObjectId,
    pub email: String,
}

impl AccountContext {
    pub fn from_claims(claims: &Claims) -> Result<Self, BookingError> {
        let user_id =
            ObjectId::parse_str(&claims.user_id).map_err(|_| BookingError::Unauthenticated)?;
        Ok(Self {
            user_id,
            email: claims.sub.clone(),
        })
    }
}

/// One account's bookings, in insertion order. Owned exclusively by that
/// account; mutated only through append and positional removal.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn append(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Removes the booking at `index` outright; no cancellation record is
    /// kept. Only confirmed bookings can be cancelled.
    pub fn cancel_at(&mut self, index: usize) -> Result<Booking, BookingError> {
        if index >= self.bookings.len() {
            return Err(BookingError::IndexOutOfRange);
        }
        if self.bookings[index].status != BookingStatus::Confirmed {
            return Err(BookingError::NotCancellable);
        }
        Ok(self.bookings.remove(index))
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn as_slice(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn into_inner(self) -> Vec<Booking> {
        self.bookings
    }
}

pub struct ReservationService {
    client: Arc<Client>,
}

impl ReservationService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn users(&self) -> Collection<User> {
        self.client.database(DB_NAME).collection("users")
    }

    /// Validates and prices the request, then appends the confirmed
    /// snapshot to the account's stored booking list. Every check runs
    /// before anything is written; a failure leaves the ledger unchanged.
    pub async fn create_booking(
        &self,
        account: &AccountContext,
        request: BookingRequest,
    ) -> Result<Booking, BookingError> {
        let booking = build_booking(&request)?;

        let mut ledger = self.load_ledger(account).await?;
        ledger.append(booking.clone());
        self.store_ledger(account, &ledger).await?;

        Ok(booking)
    }

    /// Removes the booking at `index` from the account's stored list.
    pub async fn cancel_booking(
        &self,
        account: &AccountContext,
        index: usize,
    ) -> Result<Booking, BookingError> {
        let mut ledger = self.load_ledger(account).await?;
        let removed = ledger.cancel_at(index)?;
        self.store_ledger(account, &ledger).await?;
        Ok(removed)
    }

    /// Bookings in storage order (insertion order). Callers that want
    /// newest-first sort on `created_at` when presenting.
    pub async fn list_bookings(
        &self,
        account: &AccountContext,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self.load_ledger(account).await?.into_inner())
    }

    async fn load_ledger(&self, account: &AccountContext) -> Result<BookingLedger, BookingError> {
        let user = self
            .users()
            .find_one(doc! { "_id": account.user_id })
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?
            .ok_or(BookingError::AccountNotFound)?;

        Ok(BookingLedger::new(user.bookings))
    }

    /// The storage layer has no append primitive; every mutation writes the
    /// whole list back. Concurrent writers race and the last write wins.
    async fn store_ledger(
        &self,
        account: &AccountContext,
        ledger: &BookingLedger,
    ) -> Result<(), BookingError> {
        let bookings =
            to_bson(ledger.as_slice()).map_err(|e| BookingError::Persistence(e.to_string()))?;

        self.users()
            .update_one(
                doc! { "_id": account.user_id },
                doc! { "$set": { "bookings": bookings, "updated_at": Utc::now().to_rfc3339() } },
            )
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(())
    }
}

/// Builds the immutable snapshot a booking stores. Quantities are checked
/// before dates; hotel fields are copied, never referenced.
pub fn build_booking(request: &BookingRequest) -> Result<Booking, BookingError> {
    PricingService::validate_quantities(request.guests, request.rooms)?;

    let check_out = request
        .check_out
        .unwrap_or_else(|| StayDates::default_checkout(request.check_in));
    StayDates::validate(request.check_in, check_out)?;

    let nights = StayDates::nights(request.check_in, check_out);
    let total_cost = PricingService::total_cost(nights, request.hotel.price, request.rooms);

    Ok(Booking {
        hotel_id: request.hotel.id.clone(),
        hotel_name: request.hotel.name.clone(),
        hotel_image: request.hotel.image.clone(),
        check_in: request.check_in,
        check_out,
        guests: request.guests,
        rooms: request.rooms,
        nights,
        price_per_night: request.hotel.price,
        total_cost,
        created_at: Utc::now(),
        status: BookingStatus::Confirmed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hotel::Hotel;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn sample_hotel() -> Hotel {
        Hotel {
            id: "h-1".to_string(),
            name: "Seaside Grand".to_string(),
            location: "Cape Town, South Africa".to_string(),
            price: 1000,
            rating: 4.6,
            image: "https://example.com/seaside.jpg".to_string(),
            amenities: vec!["WiFi".to_string(), "Pool".to_string()],
            description: "On the waterfront".to_string(),
        }
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(n * 86_400_000).unwrap()
    }

    fn request(
        guests: u32,
        rooms: u32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> BookingRequest {
        BookingRequest {
            hotel: sample_hotel(),
            check_in,
            check_out: Some(check_out),
            guests,
            rooms,
        }
    }

    #[test]
    fn test_three_night_two_room_booking() {
        let booking = build_booking(&request(2, 2, day(0), day(3))).unwrap();
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.price_per_night, 1000);
        assert_eq!(booking.total_cost, 6000);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_booking_snapshots_hotel_fields() {
        let booking = build_booking(&request(1, 1, day(0), day(1))).unwrap();
        assert_eq!(booking.hotel_id, "h-1");
        assert_eq!(booking.hotel_name, "Seaside Grand");
        assert_eq!(booking.hotel_image, "https://example.com/seaside.jpg");
    }

    #[test]
    fn test_partial_day_charges_an_extra_night() {
        let check_out = day(1) + Duration::hours(1);
        let booking = build_booking(&request(1, 1, day(0), check_out)).unwrap();
        assert_eq!(booking.nights, 2);
        assert_eq!(booking.total_cost, 2000);
    }

    #[test]
    fn test_quantities_are_checked_before_dates() {
        // Both quantity and dates are bad; the quantity error wins.
        let result = build_booking(&request(0, 1, day(1), day(1)));
        assert!(matches!(result, Err(BookingError::InvalidQuantity("guests"))));

        let result = build_booking(&request(2, 0, day(1), day(1)));
        assert!(matches!(result, Err(BookingError::InvalidQuantity("rooms"))));
    }

    #[test]
    fn test_missing_checkout_defaults_to_one_night() {
        let mut request = request(2, 1, day(0), day(3));
        request.check_out = None;

        let booking = build_booking(&request).unwrap();
        assert_eq!(booking.nights, 1);
        assert_eq!(booking.check_out, day(1));
        assert_eq!(booking.total_cost, 1000);
    }

    #[test]
    fn test_equal_dates_are_rejected() {
        let result = build_booking(&request(2, 1, day(1), day(1)));
        assert!(matches!(result, Err(BookingError::InvalidRange)));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = BookingLedger::default();
        let first = build_booking(&request(1, 1, day(0), day(1))).unwrap();
        let second = build_booking(&request(2, 2, day(3), day(5))).unwrap();

        ledger.append(first.clone());
        ledger.append(second.clone());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.as_slice()[0], first);
        assert_eq!(ledger.as_slice()[1], second);
    }

    #[test]
    fn test_cancel_removes_exactly_one_and_shifts() {
        let mut ledger = BookingLedger::default();
        let bookings: Vec<Booking> = (1..=3)
            .map(|n| build_booking(&request(n, 1, day(0), day(n as i64))).unwrap())
            .collect();
        for booking in &bookings {
            ledger.append(booking.clone());
        }

        let removed = ledger.cancel_at(1).unwrap();
        assert_eq!(removed, bookings[1]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.as_slice()[0], bookings[0]);
        assert_eq!(ledger.as_slice()[1], bookings[2]);
    }

    #[test]
    fn test_cancel_out_of_range() {
        let mut ledger = BookingLedger::default();
        assert!(matches!(
            ledger.cancel_at(0),
            Err(BookingError::IndexOutOfRange)
        ));

        ledger.append(build_booking(&request(1, 1, day(0), day(1))).unwrap());
        assert!(matches!(
            ledger.cancel_at(1),
            Err(BookingError::IndexOutOfRange)
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_only_confirmed_bookings_cancel() {
        let mut ledger = BookingLedger::default();
        let mut pending = build_booking(&request(1, 1, day(0), day(1))).unwrap();
        pending.status = BookingStatus::Pending;
        ledger.append(pending);

        assert!(matches!(
            ledger.cancel_at(0),
            Err(BookingError::NotCancellable)
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_account_context_rejects_malformed_ids() {
        let claims = Claims {
            sub: "guest@example.com".to_string(),
            exp: 0,
            iat: 0,
            user_id: "not-an-object-id".to_string(),
        };
        assert!(matches!(
            AccountContext::from_claims(&claims),
            Err(BookingError::Unauthenticated)
        ));

        let claims = Claims {
            user_id: ObjectId::new().to_hex(),
            ..claims
        };
        let account = AccountContext::from_claims(&claims).unwrap();
        assert_eq!(account.email, "guest@example.com");
    }
}
