use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

pub const MIN_REVIEW_COMMENT_CHARS: usize = 10;

// ============================================================================
// Intent forms raised by fare cards and dialogs
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    IncorrectPrice,
    ServiceUnavailable,
    WrongSchedule,
    Other,
}

/// Quick report raised from a fare card
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IssueReport {
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub description: String,
    pub email: Option<String>,
}

impl IssueReport {
    pub fn validate(&self) -> CoreResult<IssueType> {
        let issue_type = self
            .issue_type
            .ok_or_else(|| CoreError::ValidationError("Please select an issue type".to_string()))?;
        validate_optional_email(self.email.as_deref())?;
        Ok(issue_type)
    }
}

/// Full report form from the report page
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FareReport {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub details: String,
    pub correct_price: Option<f64>,
    pub email: Option<String>,
}

impl FareReport {
    pub fn validate(&self) -> CoreResult<()> {
        if self.company.trim().is_empty() || self.route.trim().is_empty() || self.details.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Please fill in all required fields".to_string(),
            ));
        }
        if let Some(price) = self.correct_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(CoreError::ValidationError(
                    "Correct price must be a positive amount".to_string(),
                ));
            }
        }
        validate_optional_email(self.email.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReviewSubmission {
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl ReviewSubmission {
    pub fn validate(&self) -> CoreResult<()> {
        match self.rating {
            0 => Err(CoreError::ValidationError(
                "Please select a rating before submitting".to_string(),
            )),
            1..=5 => {
                if self.comment.trim().chars().count() < MIN_REVIEW_COMMENT_CHARS {
                    Err(CoreError::ValidationError(
                        "Please write a more detailed review".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            other => Err(CoreError::ValidationError(format!(
                "Rating must be between 1 and 5, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingForm {
    #[serde(default)]
    pub passenger_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_seats")]
    pub seats: u32,
    pub travel_date: Option<NaiveDate>,
}

fn default_seats() -> u32 {
    1
}

impl BookingForm {
    pub fn validate(&self) -> CoreResult<()> {
        if self.passenger_name.trim().is_empty() {
            return Err(CoreError::ValidationError("Passenger name is required".to_string()));
        }
        let has_email = self.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        let has_phone = self.phone.as_deref().is_some_and(|p| !p.trim().is_empty());
        if !has_email && !has_phone {
            return Err(CoreError::ValidationError(
                "An email address or phone number is required".to_string(),
            ));
        }
        validate_optional_email(self.email.as_deref())?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            let valid_chars = phone.chars().all(|c| c.is_ascii_digit() || "+- ()".contains(c));
            if !valid_chars || digits < 7 {
                return Err(CoreError::ValidationError(format!("Invalid phone number '{}'", phone)));
            }
        }
        if self.seats == 0 {
            return Err(CoreError::ValidationError("At least one seat is required".to_string()));
        }
        Ok(())
    }
}

fn validate_optional_email(email: Option<&str>) -> CoreResult<()> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(());
    };
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!("Invalid email address '{}'", email)))
    }
}

// ============================================================================
// Acknowledgements
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    ReportIssue,
    SubmitReport,
    SubmitReview,
    BookNow,
}

/// Local confirmation that an intent was received. Nothing is delivered
/// or stored behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub reference: Uuid,
    pub intent: IntentKind,
    pub fare_id: Option<String>,
    pub title: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl Acknowledgement {
    pub fn new(intent: IntentKind, fare_id: Option<String>) -> Self {
        let (title, message) = match intent {
            IntentKind::ReportIssue => (
                "Report submitted",
                "Thank you for helping us improve our data!",
            ),
            IntentKind::SubmitReport => (
                "Report submitted",
                "Thank you for your feedback! We'll review it shortly.",
            ),
            IntentKind::SubmitReview => (
                "Review submitted",
                "Your review has been submitted for moderation",
            ),
            IntentKind::BookNow => (
                "Booking request received",
                "The operator will confirm your seat before departure",
            ),
        };
        Self {
            reference: Uuid::new_v4(),
            intent,
            fare_id,
            title: title.to_string(),
            message: message.to_string(),
            received_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_report_requires_type() {
        let report = IssueReport::default();
        assert!(matches!(report.validate(), Err(CoreError::ValidationError(_))));

        let report = IssueReport {
            issue_type: Some(IssueType::WrongSchedule),
            description: String::new(),
            email: Some("rider@example.com".to_string()),
        };
        assert_eq!(report.validate().unwrap(), IssueType::WrongSchedule);
    }

    #[test]
    fn test_fare_report_required_fields() {
        let mut report = FareReport {
            company: "GUO Transport".to_string(),
            route: "Enugu - Nsukka".to_string(),
            details: String::new(),
            correct_price: Some(1200.0),
            email: None,
        };
        assert!(report.validate().is_err());

        report.details = "Price went up last week".to_string();
        assert!(report.validate().is_ok());

        report.correct_price = Some(-5.0);
        assert!(report.validate().is_err());
    }

    #[test]
    fn test_review_validation() {
        let missing_rating = ReviewSubmission { rating: 0, comment: "Great trip overall".to_string() };
        assert!(missing_rating.validate().is_err());

        let too_short = ReviewSubmission { rating: 4, comment: "  ok bus  ".to_string() };
        assert!(too_short.validate().is_err());

        let out_of_range = ReviewSubmission { rating: 6, comment: "Great trip overall".to_string() };
        assert!(out_of_range.validate().is_err());

        let valid = ReviewSubmission { rating: 5, comment: "Clean bus, left on time".to_string() };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_booking_validation() {
        let mut form = BookingForm {
            passenger_name: "Ada Obi".to_string(),
            email: None,
            phone: None,
            seats: 1,
            travel_date: NaiveDate::from_ymd_opt(2024, 12, 24),
        };
        assert!(form.validate().is_err(), "contact is required");

        form.phone = Some("+234 803 000 0000".to_string());
        assert!(form.validate().is_ok());

        form.email = Some("not-an-email".to_string());
        assert!(form.validate().is_err());

        form.email = Some("ada@example.ng".to_string());
        form.seats = 0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_acknowledgement_messages() {
        let ack = Acknowledgement::new(IntentKind::SubmitReview, Some("3".to_string()));
        assert_eq!(ack.title, "Review submitted");
        assert_eq!(ack.fare_id.as_deref(), Some("3"));
        assert_ne!(ack.reference, Acknowledgement::new(IntentKind::SubmitReview, None).reference);
    }
}
