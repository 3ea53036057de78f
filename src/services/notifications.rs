use crate::models::{Booking, BookingStatus};

/// Subject and body for the guest email sent after a status change.
/// Only approved and declined transitions notify the guest.
pub fn status_email(booking: &Booking) -> Option<(String, String)> {
    let check_in = booking.check_in_date.format("%Y-%m-%d");
    let check_out = booking.check_out_date.format("%Y-%m-%d");

    match booking.status {
        BookingStatus::Approved => Some((
            format!("Booking approved: {}", booking.service_name),
            format!(
                "Hi {},\n\nGood news! Your booking for {} from {} to {} has been approved.\n\
                 We look forward to welcoming you.\n\nThe Resort Team",
                booking.name, booking.service_name, check_in, check_out
            ),
        )),
        BookingStatus::Declined => Some((
            format!("Booking declined: {}", booking.service_name),
            format!(
                "Hi {},\n\nWe're sorry, but your booking for {} from {} to {} has been declined.\n\
                 Please contact us or try a different date.\n\nThe Resort Team",
                booking.name, booking.service_name, check_in, check_out
            ),
        )),
        BookingStatus::Pending => None,
    }
}
