//! Door check-in: decoding the QR code printed on a ticket

mod qr;

pub use qr::{CheckInCode, QR_PREFIX, QrError};
