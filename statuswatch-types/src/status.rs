//! Monitor status and its display descriptors.

/// Health of a monitor as reported by a single heartbeat.
///
/// The status page encodes this as an integer; see [`Status::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Up,
    Down,
    Pending,
    Maintenance,
    #[default]
    Unknown,
}

/// Static display information for a [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    /// Human readable label ("Up", "Maintenance").
    pub label: &'static str,
    /// Short symbol for narrow columns ("UP", "MAINT").
    pub symbol: &'static str,
    /// Sort weight; higher means worse.
    pub severity: u8,
}

/// One row per status, indexed by [`Status::index`].
const DESCRIPTORS: [StatusDescriptor; 5] = [
    StatusDescriptor { label: "Up", symbol: "UP", severity: 0 },
    StatusDescriptor { label: "Down", symbol: "DOWN", severity: 4 },
    StatusDescriptor { label: "Pending", symbol: "PEND", severity: 3 },
    StatusDescriptor { label: "Maintenance", symbol: "MAINT", severity: 1 },
    StatusDescriptor { label: "Unknown", symbol: "?", severity: 2 },
];

impl Status {
    /// Every status, in descriptor table order.
    pub const ALL: [Status; 5] = [
        Status::Up,
        Status::Down,
        Status::Pending,
        Status::Maintenance,
        Status::Unknown,
    ];

    /// Decode the status page's numeric status.
    ///
    /// `0` is down, `1` up, `2` pending and `3` maintenance. Anything else
    /// is reported as [`Status::Unknown`].
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Status::Down,
            1 => Status::Up,
            2 => Status::Pending,
            3 => Status::Maintenance,
            _ => Status::Unknown,
        }
    }

    /// The numeric code used on the wire, if this status has one.
    pub fn code(&self) -> Option<u8> {
        match self {
            Status::Down => Some(0),
            Status::Up => Some(1),
            Status::Pending => Some(2),
            Status::Maintenance => Some(3),
            Status::Unknown => None,
        }
    }

    /// Position of this status in [`Status::ALL`] and the descriptor table.
    pub const fn index(&self) -> usize {
        match self {
            Status::Up => 0,
            Status::Down => 1,
            Status::Pending => 2,
            Status::Maintenance => 3,
            Status::Unknown => 4,
        }
    }

    /// Display descriptor for this status.
    pub fn descriptor(&self) -> &'static StatusDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn label(&self) -> &'static str {
        self.descriptor().label
    }

    pub fn symbol(&self) -> &'static str {
        self.descriptor().symbol
    }

    /// Ordering key for "worst first" sorting.
    pub fn severity(&self) -> u8 {
        self.descriptor().severity
    }

    /// Whether this status counts against availability.
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Down)
    }
}
