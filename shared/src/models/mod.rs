pub mod booking;
pub mod directory;
pub mod duty_slip;
pub mod financial_entry;
pub mod invoice;
pub mod review;
pub mod route;
pub mod salary_slip;

pub use booking::{Booking, BookingDraft};
pub use directory::{AccountNode, CategoryNode, Directory, DriverEntry};
pub use duty_slip::{DutySlip, DutySlipDraft, DutySlipPatch, DutySlipStatus, DutySlipSummary};
pub use financial_entry::{EntryType, FinancialEntry, FinancialEntryDraft};
pub use invoice::{HoursField, Invoice, InvoiceDraft, InvoiceSummary};
pub use review::{Review, ReviewDraft};
pub use route::{Route, RouteDraft};
pub use salary_slip::{SalarySlip, SalarySlipDraft, SalarySlipPatch, SalarySlipStatus, SalarySlipSummary};
