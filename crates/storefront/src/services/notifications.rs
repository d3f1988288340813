//! Notification sink for transactional mail.
//!
//! Delivery is always best-effort: every caller treats a send failure as
//! loggable, never as something that fails or rolls back the operation that
//! triggered it. The sink runs over SMTP via lettre, or disabled when no
//! SMTP block is configured.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use thiserror::Error;

use shopsphere_core::{Email, OrderId, TrackingStatus};

use crate::config::SmtpConfig;

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build the mail message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Recipient or from address failed to parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// A rendered notification: subject, plain-text body, optional HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// The seam between the workflows and notification delivery.
///
/// Implementations must make failures catchable; callers log and swallow
/// them at every call site.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification to `recipient`.
    fn send(
        &self,
        recipient: &Email,
        message: &NotificationMessage,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

/// The configured notification sink.
#[derive(Clone)]
pub enum Notifier {
    /// Deliver over SMTP.
    Smtp(SmtpNotifier),
    /// No SMTP configured; log the notification and report success.
    Disabled,
}

impl Notifier {
    /// Build a notifier from the optional SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns `SmtpError` if the SMTP relay parameters are invalid.
    pub fn from_config(smtp: Option<&SmtpConfig>) -> Result<Self, SmtpError> {
        match smtp {
            Some(config) => Ok(Self::Smtp(SmtpNotifier::new(config)?)),
            None => Ok(Self::Disabled),
        }
    }
}

impl NotificationSink for Notifier {
    async fn send(
        &self,
        recipient: &Email,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError> {
        match self {
            Self::Smtp(smtp) => smtp.send(recipient, message).await,
            Self::Disabled => {
                tracing::debug!(
                    recipient = %recipient,
                    subject = %message.subject,
                    "notification sink disabled, dropping message"
                );
                Ok(())
            }
        }
    }
}

/// SMTP delivery via lettre.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Create an SMTP notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SmtpError` if the SMTP relay parameters are invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

impl NotificationSink for SmtpNotifier {
    async fn send(
        &self,
        recipient: &Email,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError> {
        let from = self
            .from_address
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(self.from_address.clone()))?;
        let to = recipient
            .as_str()
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(recipient.as_str().to_owned()))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject);

        let email = match &message.html {
            Some(html) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            )?,
            None => builder.singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(message.text.clone()),
            )?,
        };

        self.mailer.send(email).await?;
        Ok(())
    }
}

// =============================================================================
// Message builders
// =============================================================================

/// One line of an order confirmation summary.
#[derive(Debug, Clone)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl SummaryLine {
    fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Format a naira amount for mail bodies.
fn naira(amount: Decimal) -> String {
    format!("\u{20a6}{amount:.2}")
}

/// Render the order confirmation sent after a successful checkout commit.
#[must_use]
pub fn order_confirmation(
    recipient: &Email,
    order_id: OrderId,
    lines: &[SummaryLine],
    total: Decimal,
) -> NotificationMessage {
    let items_text = lines
        .iter()
        .map(|line| {
            format!(
                "{} (x{}) - {}",
                line.name,
                line.quantity,
                naira(line.subtotal())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "Hi {name},\n\n\
         Thank you for your order #{order_id} on ShopSphere!\n\n\
         Order Summary:\n\
         {items_text}\n\n\
         Total: {total}\n\n\
         We will notify you once your order is shipped.\n\n\
         \u{2013} ShopSphere Team\n",
        name = recipient.local_part(),
        total = naira(total),
    );

    NotificationMessage {
        subject: "ShopSphere Order Confirmation".to_owned(),
        text,
        html: None,
    }
}

/// Render the notification sent when a tracking update is appended.
#[must_use]
pub fn tracking_update(
    recipient: &Email,
    order_id: OrderId,
    status: TrackingStatus,
    location: Option<&str>,
) -> NotificationMessage {
    let location_line = location
        .filter(|l| !l.is_empty())
        .map(|l| format!("\nCurrent location: {l}."))
        .unwrap_or_default();

    let text = format!(
        "Hi {name},\n\n\
         Your order #{order_id} tracking status is now '{status}'.{location_line}\n\n\
         \u{2013} ShopSphere Team\n",
        name = recipient.local_part(),
    );

    NotificationMessage {
        subject: format!("Your Order #{order_id} Has Been Updated"),
        text,
        html: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn recipient() -> Email {
        Email::parse("ada@example.com").unwrap()
    }

    #[test]
    fn test_order_confirmation_itemizes_lines() {
        let lines = vec![
            SummaryLine {
                name: "Ankara Shirt".to_owned(),
                quantity: 2,
                unit_price: dec!(1000.00),
            },
            SummaryLine {
                name: "Leather Sandals".to_owned(),
                quantity: 1,
                unit_price: dec!(2500.00),
            },
        ];

        let msg = order_confirmation(&recipient(), OrderId::new(42), &lines, dec!(4500.00));

        assert_eq!(msg.subject, "ShopSphere Order Confirmation");
        assert!(msg.text.contains("Hi ada,"));
        assert!(msg.text.contains("order #42"));
        assert!(msg.text.contains("Ankara Shirt (x2) - \u{20a6}2000.00"));
        assert!(msg.text.contains("Leather Sandals (x1) - \u{20a6}2500.00"));
        assert!(msg.text.contains("Total: \u{20a6}4500.00"));
        assert!(msg.html.is_none());
    }

    #[test]
    fn test_tracking_update_includes_status_and_location() {
        let msg = tracking_update(
            &recipient(),
            OrderId::new(7),
            TrackingStatus::Shipped,
            Some("Lagos Hub"),
        );

        assert_eq!(msg.subject, "Your Order #7 Has Been Updated");
        assert!(msg.text.contains("status is now 'Shipped'"));
        assert!(msg.text.contains("Current location: Lagos Hub."));
    }

    #[test]
    fn test_tracking_update_without_location() {
        let msg = tracking_update(&recipient(), OrderId::new(7), TrackingStatus::InTransit, None);

        assert!(msg.text.contains("status is now 'In Transit'"));
        assert!(!msg.text.contains("Current location"));
    }

    #[test]
    fn test_naira_formatting() {
        assert_eq!(naira(dec!(4500)), "\u{20a6}4500.00");
        assert_eq!(naira(dec!(19.9)), "\u{20a6}19.90");
    }
}
