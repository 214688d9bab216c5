//! The four operation forms on the "Операции" tab.
//!
//! Forms are typed so the console can collect and echo them, but submitting
//! one is not wired to anything: no card or account is touched and no store
//! changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One choice in a form's drop-down
pub trait FormOption: Sized + Copy + 'static {
    /// Every option, in display order
    const ALL: &'static [Self];

    /// Value submitted by the form
    fn value(self) -> &'static str;

    /// Russian label shown to the operator
    fn label(self) -> &'static str;

    /// Looks an option up by its submitted value
    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.value() == value)
    }
}

/// Why a card is being blocked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardBlockReason {
    /// Card lost
    Lost,
    /// Card stolen
    Stolen,
    /// Suspected fraud
    Fraud,
    /// Client asked for it
    Client,
}

impl FormOption for CardBlockReason {
    const ALL: &'static [Self] = &[Self::Lost, Self::Stolen, Self::Fraud, Self::Client];

    fn value(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Stolen => "stolen",
            Self::Fraud => "fraud",
            Self::Client => "client",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Lost => "Утеря карты",
            Self::Stolen => "Кража карты",
            Self::Fraud => "Подозрение на мошенничество",
            Self::Client => "По запросу клиента",
        }
    }
}

/// Why mobile app access is being blocked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppBlockReason {
    /// Device lost
    DeviceLost,
    /// Suspicious activity
    Suspicious,
    /// Client asked for it
    Client,
}

impl FormOption for AppBlockReason {
    const ALL: &'static [Self] = &[Self::DeviceLost, Self::Suspicious, Self::Client];

    fn value(self) -> &'static str {
        match self {
            Self::DeviceLost => "device-lost",
            Self::Suspicious => "suspicious",
            Self::Client => "client",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::DeviceLost => "Утеря устройства",
            Self::Suspicious => "Подозрительная активность",
            Self::Client => "По запросу клиента",
        }
    }
}

/// How a reissued card reaches the client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryType {
    /// 5-7 days
    Standard,
    /// 2-3 days
    Express,
    /// Picked up at a branch
    Branch,
}

impl FormOption for DeliveryType {
    const ALL: &'static [Self] = &[Self::Standard, Self::Express, Self::Branch];

    fn value(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Branch => "branch",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Standard => "Стандартная (5-7 дней)",
            Self::Express => "Экспресс (2-3 дня)",
            Self::Branch => "Самовывоз из отделения",
        }
    }
}

/// Which form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Urgent card block
    CardBlock,
    /// Mobile app block
    AppBlock,
    /// Card reissue
    CardReissue,
    /// Client data lookup
    ClientLookup,
}

impl OperationKind {
    /// Every form, in tab order
    pub const ALL: [Self; 4] = [
        Self::CardBlock,
        Self::AppBlock,
        Self::CardReissue,
        Self::ClientLookup,
    ];

    /// Card title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CardBlock => "Блокировка карты",
            Self::AppBlock => "Блокировка приложения",
            Self::CardReissue => "Перевыпуск карты",
            Self::ClientLookup => "Управление данными клиента",
        }
    }

    /// Card subtitle
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CardBlock => "Срочная блокировка банковской карты клиента",
            Self::AppBlock => "Блокировка доступа к мобильному приложению",
            Self::CardReissue => "Оформление перевыпуска банковской карты",
            Self::ClientLookup => "Просмотр и редактирование информации о клиенте",
        }
    }

    /// Submit button text
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::CardBlock => "Заблокировать карту",
            Self::AppBlock => "Заблокировать приложение",
            Self::CardReissue => "Оформить перевыпуск",
            Self::ClientLookup => "Найти клиента",
        }
    }

    /// Console usage line
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::CardBlock => "block-card <номер карты> <телефон> <причина>",
            Self::AppBlock => "block-app <телефон> <причина> <email>",
            Self::CardReissue => "reissue <номер карты> <телефон> <доставка> <адрес...>",
            Self::ClientLookup => "lookup <телефон или номер карты>",
        }
    }
}

/// A filled-in operation form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationForm {
    /// Block a bank card
    CardBlock {
        /// Card number
        card_number: String,
        /// Client phone
        phone: String,
        /// Reason
        reason: CardBlockReason,
    },
    /// Block mobile app access
    AppBlock {
        /// Client phone
        phone: String,
        /// Reason
        reason: AppBlockReason,
        /// Where to send the recovery code
        recovery_email: String,
    },
    /// Reissue a bank card
    CardReissue {
        /// Old card number
        card_number: String,
        /// Client phone
        phone: String,
        /// Delivery address
        delivery_address: String,
        /// Delivery method
        delivery: DeliveryType,
    },
    /// Look a client up by phone or card number
    ClientLookup {
        /// Phone or card number
        query: String,
    },
}

impl OperationForm {
    /// Which form this is
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::CardBlock { .. } => OperationKind::CardBlock,
            Self::AppBlock { .. } => OperationKind::AppBlock,
            Self::CardReissue { .. } => OperationKind::CardReissue,
            Self::ClientLookup { .. } => OperationKind::ClientLookup,
        }
    }
}

impl fmt::Display for OperationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardBlock {
                card_number,
                phone,
                reason,
            } => write!(
                f,
                "Номер карты: {card_number}\nТелефон: {phone}\nПричина: {}",
                reason.label()
            ),
            Self::AppBlock {
                phone,
                reason,
                recovery_email,
            } => write!(
                f,
                "Телефон: {phone}\nEmail: {recovery_email}\nПричина: {}",
                reason.label()
            ),
            Self::CardReissue {
                card_number,
                phone,
                delivery_address,
                delivery,
            } => write!(
                f,
                "Номер карты: {card_number}\nТелефон: {phone}\nАдрес: {delivery_address}\nДоставка: {}",
                delivery.label()
            ),
            Self::ClientLookup { query } => write!(f, "Поиск клиента: {query}"),
        }
    }
}
