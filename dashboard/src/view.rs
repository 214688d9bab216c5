//! Plain-text renderings of the dashboard tabs.
//!
//! Every function takes the state (or part of it) by reference and returns
//! the text to print; none of them write to the terminal.

use crate::analytics::{
    ADMIN_ACTIVITY, DashboardStats, OPERATION_MIX, admin_initials, requests_word, top_request_types,
};
use crate::display::{priority_label, priority_marker, status_label, status_marker};
use crate::operations::{AppBlockReason, CardBlockReason, DeliveryType, FormOption, OperationForm, OperationKind};
use crate::types::{AuditLogEntry, DashboardState, QueueFilter, Request, RequestStatus};
use std::fmt::Write as _;

/// Bank name in the header
pub const BANK_NAME: &str = "Альфа-Банк";
/// Header subtitle
pub const CONSOLE_TITLE: &str = "Панель администратора колл-центра";
/// Printed when an id does not match any request
pub const NOT_FOUND: &str = "❌ Заявка не найдена";
/// Printed for input that is not a command
pub const UNKNOWN_COMMAND: &str = "❓ Неизвестная команда. Используйте /menu для вызова меню.";
/// Printed in place of the dynamics chart
pub const CHART_PLACEHOLDER: &str = "График динамики обработки заявок за последние 7 дней";

/// Header line with the logged-in administrator
#[must_use]
pub fn header(admin: &str) -> String {
    format!("{BANK_NAME} · {CONSOLE_TITLE}\n{admin}")
}

/// The five header tiles
#[must_use]
pub fn stats(stats: &DashboardStats) -> String {
    format!(
        "📊 Статистика\n\
         Всего заявок: {}\n\
         В очереди: {}\n\
         В работе: {}\n\
         Завершено: {}\n\
         Ср. время: {}",
        stats.total_requests,
        stats.pending_requests,
        stats.processing_requests,
        stats.completed_today,
        stats.avg_response_time,
    )
}

fn queue_line(request: &Request) -> String {
    format!(
        "{} {} #{} {} · {} · {}",
        priority_marker(request.priority),
        status_marker(request.status),
        request.id,
        request.client_name,
        request.kind,
        request.timestamp,
    )
}

/// Every request in seed order, or those matching a filter
#[must_use]
pub fn queue(state: &DashboardState, filter: Option<QueueFilter>, limit: usize) -> String {
    let listed = state.filtered_queue(filter, limit);
    let title = match filter {
        None => "Все заявки".to_string(),
        Some(QueueFilter::Active) => "Активные заявки".to_string(),
        Some(QueueFilter::Priority(priority)) => format!("Заявки · {}", priority_label(priority)),
        Some(QueueFilter::Status(status)) => format!("Заявки · {}", status_label(status)),
    };
    if listed.is_empty() {
        return match filter {
            Some(QueueFilter::Active) => "✅ Нет активных заявок".to_string(),
            _ => format!("📋 {title}: нет заявок"),
        };
    }

    let mut out = format!("📋 {title} ({})\n", listed.len());
    for request in listed {
        out.push_str(&queue_line(request));
        out.push('\n');
    }
    out.push_str("\nКоманды: take <id>, complete <id> [комментарий], show <id>");
    out
}

/// The full card for one request, with the buttons its status offers
#[must_use]
pub fn request_card(request: &Request) -> String {
    let mut out = format!(
        "Заявка #{}\n\
         Клиент: {}\n\
         Телефон: {}\n\
         Тип: {}\n\
         Приоритет: {} {}\n\
         Статус: {} {}\n\
         Создана: {}",
        request.id,
        request.client_name,
        request.phone,
        request.kind,
        priority_marker(request.priority),
        priority_label(request.priority),
        status_marker(request.status),
        status_label(request.status),
        request.timestamp,
    );
    match request.status {
        RequestStatus::Pending => {
            let _ = write!(out, "\n\ntake {}", request.id);
        },
        RequestStatus::Processing => {
            let _ = write!(out, "\n\ncomplete {} [комментарий]", request.id);
        },
        RequestStatus::Completed => {},
    }
    out
}

/// Printed instead of a transition the request's status does not offer
#[must_use]
pub fn transition_refused(request: &Request) -> String {
    match request.status {
        RequestStatus::Pending => {
            format!("⚠️ Заявка #{0} ещё не в работе. Сначала: take {0}", request.id)
        },
        RequestStatus::Processing => {
            format!("⚠️ Заявка #{0} уже в работе. Завершить: complete {0}", request.id)
        },
        RequestStatus::Completed => format!("⚠️ Заявка #{} уже завершена", request.id),
    }
}

fn audit_line(entry: &AuditLogEntry) -> String {
    format!(
        "#{} {} · {}\n  {} · {}\n  {}",
        entry.id, entry.timestamp, entry.action, entry.client_name, entry.admin, entry.details
    )
}

/// The audit log, newest first
#[must_use]
pub fn audit_log(entries: &[AuditLogEntry]) -> String {
    if entries.is_empty() {
        return "📜 Журнал аудита пуст".to_string();
    }
    let lines: Vec<String> = entries.iter().map(audit_line).collect();
    format!("📜 Журнал аудита ({})\n{}", entries.len(), lines.join("\n"))
}

/// Confirmation printed after a completion went through
#[must_use]
pub fn completed(request: &Request, entry: Option<&AuditLogEntry>) -> String {
    let mut out = format!("✅ Заявка #{} успешно завершена!", request.id);
    if let Some(entry) = entry {
        let _ = write!(out, "\nЗапись аудита #{}: {}", entry.id, entry.details);
    }
    out
}

/// Confirmation printed after a request was taken into work
#[must_use]
pub fn taken(request: &Request) -> String {
    format!("🔄 Заявка #{} взята в работу", request.id)
}

/// Operation mix, admin activity and top request types
#[must_use]
pub fn analytics(state: &DashboardState) -> String {
    let mut out = String::from("📈 Распределение операций\n");
    for (operation, share) in OPERATION_MIX {
        let _ = writeln!(out, "  {operation}: {share}%");
    }

    out.push_str("\n👥 Активность администраторов\n");
    for (admin, handled) in ADMIN_ACTIVITY {
        let _ = writeln!(
            out,
            "  [{}] {admin}: {handled} {}",
            admin_initials(admin),
            requests_word(handled)
        );
    }

    out.push_str("\n🏷 Популярные типы заявок\n");
    for (kind, count) in top_request_types(state, 5) {
        let _ = writeln!(out, "  {kind}: {count}");
    }

    let _ = write!(out, "\n{CHART_PLACEHOLDER}");
    out
}

fn option_list<T: FormOption>() -> String {
    T::ALL
        .iter()
        .map(|option| format!("{} ({})", option.value(), option.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The four operation cards with their console usage
#[must_use]
pub fn operations() -> String {
    let mut out = String::from("🛠 Операции\n");
    for kind in OperationKind::ALL {
        let _ = write!(
            out,
            "\n{}\n  {}\n  {}: {}\n",
            kind.title(),
            kind.description(),
            kind.submit_label(),
            kind.usage()
        );
        let options = match kind {
            OperationKind::CardBlock => Some(option_list::<CardBlockReason>()),
            OperationKind::AppBlock => Some(option_list::<AppBlockReason>()),
            OperationKind::CardReissue => Some(option_list::<DeliveryType>()),
            OperationKind::ClientLookup => None,
        };
        if let Some(options) = options {
            let _ = writeln!(out, "  Варианты: {options}");
        }
    }
    out
}

/// Echo of a submitted form
#[must_use]
pub fn submitted(form: &OperationForm) -> String {
    format!(
        "📝 {}\n{form}\nФорма принята. Операция не выполнена: обработчик не подключён.",
        form.kind().title()
    )
}

/// Command list
#[must_use]
pub fn help() -> String {
    [
        "📱 Меню",
        "/requests [active|high|medium|low|pending|processing|completed]  заявки",
        "/show <id>  карточка заявки",
        "/take <id>  взять в работу",
        "/complete <id> [комментарий]  завершить заявку",
        "/audit  журнал аудита",
        "/stats  статистика и аналитика",
        "/ops  операции",
        "/menu  это меню",
        "/quit  выход",
    ]
    .join("\n")
}
