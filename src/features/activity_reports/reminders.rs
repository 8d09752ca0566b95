//! WhatsApp reminders for members who have not reported yet.

use chrono::{Datelike, NaiveDate};

use crate::features::activity_reports::models::Period;
use crate::shared::constants::{FALLBACK_FIRST_NAME, WHATSAPP_BASE_URL};
use crate::shared::validation::NON_DIGIT_REGEX;

#[derive(Debug, Clone)]
pub struct ReminderPolicy {
    pub deadline_day: u32,
    pub country_code: String,
}

impl ReminderPolicy {
    pub fn new(deadline_day: u32, country_code: impl Into<String>) -> Self {
        Self {
            deadline_day,
            country_code: country_code.into(),
        }
    }

    /// Reminder text; the wording turns firmer once `today` is past the deadline day.
    pub fn message(&self, member_name: &str, period: Period, today: NaiveDate) -> String {
        let name = first_name(member_name);

        if today.day() <= self.deadline_day {
            format!(
                "Olá {name}, tudo bem? Lembrete amigável: Não esqueça de preencher o relatório da COLIH de {period} até o dia {}. Obrigado!",
                self.deadline_day
            )
        } else {
            format!(
                "Olá {name}. O prazo do dia {} já passou. Por favor, poderia preencher o relatório da COLIH de {period} hoje? Precisamos fechar os dados.",
                self.deadline_day
            )
        }
    }

    /// Click-to-chat link, or `None` when the number has no digits
    pub fn whatsapp_link(&self, phone: &str, message: &str) -> Option<String> {
        let digits = NON_DIGIT_REGEX.replace_all(phone, "");
        if digits.is_empty() {
            return None;
        }

        Some(format!(
            "{}/{}{}?text={}",
            WHATSAPP_BASE_URL,
            self.country_code,
            digits,
            urlencoding::encode(message)
        ))
    }
}

/// First whitespace-separated word of a display name
pub fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(FALLBACK_FIRST_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReminderPolicy {
        ReminderPolicy::new(10, "55")
    }

    fn period() -> Period {
        "2026-01".parse().unwrap()
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name("Maria da Silva"), "Maria");
        assert_eq!(first_name("  João  "), "João");
        assert_eq!(first_name(""), "Irmão");
        assert_eq!(first_name("   "), "Irmão");
    }

    #[test]
    fn test_message_before_deadline_is_friendly() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let message = policy().message("Maria da Silva", period(), today);

        assert!(message.starts_with("Olá Maria, tudo bem?"));
        assert!(message.contains("2026-01"));
        assert!(message.contains("até o dia 10"));
    }

    #[test]
    fn test_message_after_deadline_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let message = policy().message("Maria da Silva", period(), today);

        assert!(message.starts_with("Olá Maria. O prazo do dia 10 já passou."));
        assert!(message.contains("2026-01"));
    }

    #[test]
    fn test_whatsapp_link_strips_formatting() {
        let link = policy()
            .whatsapp_link("(55) 99999-8888", "Olá Maria")
            .unwrap();

        assert_eq!(link, "https://wa.me/5555999998888?text=Ol%C3%A1%20Maria");
    }

    #[test]
    fn test_whatsapp_link_requires_digits() {
        assert_eq!(policy().whatsapp_link("sem número", "oi"), None);
        assert_eq!(policy().whatsapp_link("", "oi"), None);
    }
}
