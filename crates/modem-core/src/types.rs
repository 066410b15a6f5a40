//! Shared data types for the modem driver.
//!
//! Enum discriminants that encode 3GPP values (RAT selection per TS 27.007
//! +COPS, registration status per +CREG) keep those values explicitly.

/// Reported when a signal metric is unknown or not applicable.
pub const INVALID_SIGNAL_VALUE: i16 = -32768;

/// Reported when a signal-bar level cannot be computed.
pub const INVALID_SIGNAL_BAR_VALUE: u8 = 0xFF;

/// Radio Access Technologies. Reference 3GPP TS 27.007 PLMN selection +COPS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rat {
    /// GSM network.
    Gsm = 0,
    /// WCDMA network.
    Wcdma = 2,
    /// EDGE network.
    Edge = 3,
    /// HSDPA network.
    Hsdpa = 4,
    /// HSUPA network.
    Hsupa = 5,
    /// HSDPA + HSUPA network.
    HsdpaHsupa = 6,
    /// LTE network.
    Lte = 7,
    /// LTE CAT-M1 network.
    CatM1 = 8,
    /// NB-IoT network.
    NbIot = 9,
    /// Not attached to any known technology.
    #[default]
    Invalid = 0xFF,
}

/// Unsolicited result code event classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrcEvent {
    /// Network CS registration URC event.
    NetworkCsRegistration,
    /// Network PS registration URC event.
    NetworkPsRegistration,
    /// PDN activated URC event.
    PdnActivated,
    /// PDN deactivated URC event.
    PdnDeactivated,
    /// Signal changed URC event.
    SignalChanged,
    /// Socket opened URC event.
    SocketOpened,
    /// Socket open failed URC event.
    SocketOpenFailed,
    /// Any URC event other than the above.
    Other,
}

/// Modem-originated events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemEvent {
    /// Bootup or reboot modem event.
    BootupOrReboot,
    /// Power down modem event.
    PoweredDown,
    /// PSM enter modem event.
    PsmEnter,
}

/// Network registration mode. Reference 3GPP TS 27.007 +COPS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRegistrationMode {
    /// Automatic network selection.
    Auto = 0,
    /// Manual network selection.
    Manual = 1,
    /// Deregister from the network.
    Deregister = 2,
    /// Manual selection with automatic fallback.
    ManualThenAuto = 4,
    /// Registration mode not known.
    #[default]
    Unknown = 0xFF,
}

/// Network registration status. Reference 3GPP TS 27.007 +CREG.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRegistrationStatus {
    /// Not registered, not searching.
    NotRegisteredNotSearching = 0,
    /// Registered on the home network.
    RegisteredHome = 1,
    /// Not registered, searching.
    NotRegisteredSearching = 2,
    /// Registration denied.
    RegistrationDenied = 3,
    /// Registration status not known.
    #[default]
    Unknown = 4,
    /// Registered, roaming.
    RegisteredRoaming = 5,
    /// Registered on the home network for SMS only.
    RegisteredHomeSmsOnly = 6,
    /// Registered roaming for SMS only.
    RegisteredRoamingSmsOnly = 7,
    /// Attached for emergency services only.
    AttachedEmergencyOnly = 8,
}

/// Format of a reported operator name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OperatorNameFormat {
    /// Long alphanumeric format.
    Long = 0,
    /// Short alphanumeric format.
    Short = 1,
    /// Numeric (MCC/MNC) format.
    Numeric = 2,
    /// No operator name present.
    #[default]
    NotPresent = 9,
}

/// Public Land Mobile Network identification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlmnInfo {
    /// Mobile Country Code.
    pub mcc: String,
    /// Mobile Network Code.
    pub mnc: String,
}

/// Network service status delivered with registration URCs.
#[derive(Debug, Default, Clone)]
pub struct ServiceStatus {
    /// Radio access technology currently in use.
    pub rat: Rat,
    /// Currently selected registration mode.
    pub network_registration_mode: NetworkRegistrationMode,
    /// Circuit-switched registration status.
    pub cs_registration_status: NetworkRegistrationStatus,
    /// Packet-switched registration status.
    pub ps_registration_status: NetworkRegistrationStatus,
    /// Registered MCC/MNC.
    pub plmn: PlmnInfo,
    /// Format of the registered operator name.
    pub operator_name_format: OperatorNameFormat,
    /// Registered network operator name.
    pub operator_name: String,
}

/// Signal quality information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalInfo {
    /// Received Signal Strength Indicator in dBm.
    pub rssi: i16,
    /// LTE Reference Signal Received Power in dBm.
    pub rsrp: i16,
    /// LTE Reference Signal Received Quality in dB.
    pub rsrq: i16,
    /// LTE Signal to Interference-Noise Ratio in dB.
    pub sinr: i16,
    /// Bit Error Rate in units of 0.01%.
    pub ber: i16,
    /// Signal strength on a 0..=5 bar scale.
    pub bars: u8,
}

impl SignalInfo {
    /// A `SignalInfo` with every metric set to its invalid sentinel.
    pub fn invalid() -> Self {
        Self {
            rssi: INVALID_SIGNAL_VALUE,
            rsrp: INVALID_SIGNAL_VALUE,
            rsrq: INVALID_SIGNAL_VALUE,
            sinr: INVALID_SIGNAL_VALUE,
            ber: INVALID_SIGNAL_VALUE,
            bars: INVALID_SIGNAL_BAR_VALUE,
        }
    }
}

/// Socket address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDomain {
    /// IPv4 socket.
    Ipv4,
    /// IPv6 socket.
    Ipv6,
}

/// Socket communication style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Datagram socket.
    Datagram,
    /// Stream socket.
    Stream,
}

/// Socket transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketProtocol {
    /// UDP socket.
    Udp,
    /// TCP socket.
    Tcp,
}

/// State of a logical modem socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    /// Slot claimed, no connection attempted yet.
    Allocated,
    /// Connect request submitted to the modem.
    Connecting,
    /// Connection established.
    Connected,
    /// Connection torn down.
    Disconnected,
}
