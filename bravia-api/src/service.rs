/// The HTTP services exposed by a Bravia television
///
/// Three of them speak the JSON-RPC dialect; `Ircc` takes SOAP envelopes that
/// emulate infrared remote-control button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// System service - power, device information, remote-controller codes
    System,

    /// AV content service - playing content, sources and content lists
    AvContent,

    /// Audio service - volume information and control
    Audio,

    /// IRCC service - infrared remote-control code emulation
    Ircc,
}

/// Endpoint information for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The HTTP endpoint path (relative to the device base URL)
    pub endpoint: &'static str,

    /// Whether requests to this endpoint carry a JSON-RPC body
    pub json: bool,
}

impl Service {
    /// Get the name of this service as used in the endpoint path
    pub fn name(&self) -> &'static str {
        match self {
            Service::System => "system",
            Service::AvContent => "avContent",
            Service::Audio => "audio",
            Service::Ircc => "IRCC",
        }
    }

    /// Get the endpoint information for this service
    pub fn info(&self) -> ServiceInfo {
        match self {
            Service::System => ServiceInfo {
                endpoint: "sony/system",
                json: true,
            },
            Service::AvContent => ServiceInfo {
                endpoint: "sony/avContent",
                json: true,
            },
            Service::Audio => ServiceInfo {
                endpoint: "sony/audio",
                json: true,
            },
            Service::Ircc => ServiceInfo {
                endpoint: "sony/IRCC",
                json: false,
            },
        }
    }
}
