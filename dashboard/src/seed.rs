//! Sample data every session starts from.

use crate::types::{
    AuditId, AuditLogEntry, DashboardState, Priority, Request, RequestId, RequestStatus,
};

/// Operation type label for card blocking
pub const CARD_BLOCK: &str = "Блокировка карты";
/// Operation type label for card reissue
pub const CARD_REISSUE: &str = "Перевыпуск карты";
/// Operation type label for app blocking
pub const APP_BLOCK: &str = "Блокировка приложения";

/// The administrator every action is attributed to unless configured otherwise
pub const DEFAULT_ADMIN: &str = "Администратор #1";

fn request(
    id: &str,
    client_name: &str,
    phone: &str,
    kind: &str,
    priority: Priority,
    status: RequestStatus,
    timestamp: &str,
) -> Request {
    Request {
        id: RequestId::new(id),
        client_name: client_name.to_string(),
        phone: phone.to_string(),
        kind: kind.to_string(),
        priority,
        status,
        timestamp: timestamp.to_string(),
    }
}

fn entry(
    id: &str,
    action: &str,
    admin: &str,
    client_name: &str,
    details: &str,
    timestamp: &str,
) -> AuditLogEntry {
    AuditLogEntry {
        id: AuditId::new(id),
        action: action.to_string(),
        admin: admin.to_string(),
        client_name: client_name.to_string(),
        details: details.to_string(),
        timestamp: timestamp.to_string(),
    }
}

/// Seeded request queue
#[must_use]
pub fn requests() -> Vec<Request> {
    vec![
        request(
            "1",
            "Иванов Иван Иванович",
            "+7 (999) 123-45-67",
            CARD_BLOCK,
            Priority::High,
            RequestStatus::Pending,
            "2026-01-17 14:32",
        ),
        request(
            "2",
            "Петрова Мария Сергеевна",
            "+7 (999) 234-56-78",
            CARD_REISSUE,
            Priority::Medium,
            RequestStatus::Processing,
            "2026-01-17 14:15",
        ),
        request(
            "3",
            "Сидоров Петр Александрович",
            "+7 (999) 345-67-89",
            APP_BLOCK,
            Priority::High,
            RequestStatus::Pending,
            "2026-01-17 14:05",
        ),
    ]
}

/// Seeded audit log, newest first
#[must_use]
pub fn audit_log() -> Vec<AuditLogEntry> {
    vec![
        entry(
            "1",
            CARD_BLOCK,
            "Администратор #1",
            "Козлов А.В.",
            "Карта **** 1234 заблокирована по запросу клиента",
            "2026-01-17 13:45",
        ),
        entry(
            "2",
            CARD_REISSUE,
            "Администратор #2",
            "Новикова Е.П.",
            "Оформлен перевыпуск карты, срок доставки 5-7 дней",
            "2026-01-17 13:20",
        ),
        entry(
            "3",
            APP_BLOCK,
            "Администратор #1",
            "Морозов Д.И.",
            "Доступ к приложению заблокирован, код восстановления выслан на email",
            "2026-01-17 12:55",
        ),
    ]
}

impl DashboardState {
    /// A fresh session: the seeded queue and audit log
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(requests(), audit_log())
    }
}
