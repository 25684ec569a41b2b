pub mod facture_status;
pub mod payment_mode;
pub mod reservation_status;

pub use facture_status::FactureStatus;
pub use payment_mode::PaymentMode;
pub use reservation_status::ReservationStatus;
