use std::time::Duration;

use serde_json::Value;
use transport::{HttpTransport, Transport, TransportError, DEFAULT_TIMEOUT};

use crate::command::{CommandTable, IrCommand};
use crate::envelope::{check_ircc_response, parse_json_response};
use crate::error::{ApiError, Result};
use crate::operation::BraviaOperation;
use crate::operations::{
    ContentItem, GetContentList, GetContentListRequest, GetNetworkSettings, GetPlayingContentInfo,
    GetPowerStatus, GetRemoteControllerInfo, GetSourceList, GetSourceListRequest,
    GetSystemInformation, GetVolumeInformation, NetworkInterface, PlayingContentInfo, PowerStatus,
    SetAudioVolume, SetAudioVolumeRequest, SetPlayContent, SetPlayContentRequest, SetPowerStatus,
    SetPowerStatusRequest, SystemInformation, VolumeInfo,
};
use crate::request::{build_ircc_envelope, IRCC_SOAP_ACTION};
use crate::service::Service;
use crate::wol;

/// Header carrying the pre-shared key
const PSK_HEADER: &str = "X-Auth-PSK";

/// Tuner sources whose channels are listed by [`BraviaClient::load_source_list`]
const TUNER_SOURCES: [&str; 2] = ["tv:dvbc", "tv:dvbt"];

/// Source of the HDMI inputs
const HDMI_SOURCE: &str = "extInput:hdmi";

/// Audio output addressed by volume operations
const SPEAKER_TARGET: &str = "speaker";

/// A client for one Bravia television
///
/// The client owns the network transport and the device's remote-controller
/// command table. Every call is a blocking request/response exchange bounded
/// by the transport timeout; there is never more than one request in flight.
///
/// ```rust,no_run
/// use bravia_api::{BraviaClient, IrCommand};
///
/// let mut client = BraviaClient::new("192.168.1.191", "sony");
/// if client.get_power_status()?.is_active() {
///     client.send_command(IrCommand::VolumeUp)?;
/// }
/// # Ok::<(), bravia_api::ApiError>(())
/// ```
#[derive(Debug)]
pub struct BraviaClient {
    transport: Box<dyn Transport>,
    psk: String,
    mac_address: Option<String>,
    commands: CommandTable,
}

/// Builder for [`BraviaClient`]
#[derive(Debug, Clone)]
pub struct BraviaClientBuilder {
    host: String,
    psk: String,
    mac_address: Option<String>,
    timeout: Duration,
}

impl BraviaClientBuilder {
    /// MAC address used for Wake-on-LAN power-on
    pub fn mac_address(mut self, mac: impl Into<String>) -> Self {
        self.mac_address = Some(mac.into());
        self
    }

    /// Connect and read timeout for every request (default 5 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> BraviaClient {
        let transport = HttpTransport::with_timeout(self.host, self.timeout);
        let mut client = BraviaClient::with_transport(Box::new(transport), self.psk);
        client.mac_address = self.mac_address;
        client
    }
}

impl BraviaClient {
    /// Create a client for the television at `host` using the default timeout
    pub fn new(host: impl Into<String>, psk: impl Into<String>) -> Self {
        Self::builder(host, psk).build()
    }

    pub fn builder(host: impl Into<String>, psk: impl Into<String>) -> BraviaClientBuilder {
        BraviaClientBuilder {
            host: host.into(),
            psk: psk.into(),
            mac_address: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(transport: Box<dyn Transport>, psk: impl Into<String>) -> Self {
        Self {
            transport,
            psk: psk.into(),
            mac_address: None,
            commands: CommandTable::new(),
        }
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.mac_address.as_deref()
    }

    /// The command table as currently cached
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Send one IR code and return the raw response body
    ///
    /// A SOAP fault is reported as [`ApiError::SoapFault`] whatever the HTTP
    /// status it came with.
    pub fn send_ircc(&self, code: &str) -> Result<String> {
        let body = build_ircc_envelope(code);
        let response = match self.transport.post(
            Service::Ircc.info().endpoint,
            &[
                (PSK_HEADER, self.psk.as_str()),
                ("SOAPACTION", IRCC_SOAP_ACTION),
                ("Content-Type", "text/xml; charset=UTF-8"),
            ],
            &body,
        ) {
            Ok(response) => response,
            Err(TransportError::Status { code, body }) => {
                return match check_ircc_response(&body) {
                    Err(fault @ ApiError::SoapFault(_)) => Err(fault),
                    _ => Err(ApiError::HttpStatus(code)),
                };
            }
            Err(e) => return Err(e.into()),
        };

        check_ircc_response(&response.body)?;
        Ok(response.body)
    }

    /// Post a JSON-RPC body to `service` and return the `result` list
    ///
    /// An error envelope sent with a non-success status is still reported as
    /// [`ApiError::DeviceError`].
    pub fn send_json(&self, service: Service, body: &str) -> Result<Vec<Value>> {
        let info = service.info();
        if !info.json {
            return Err(ApiError::InvalidParameter(format!(
                "{} does not take JSON-RPC requests",
                service.name()
            )));
        }

        let response = match self.transport.post(
            info.endpoint,
            &[
                (PSK_HEADER, self.psk.as_str()),
                ("Content-Type", "application/json; charset=UTF-8"),
            ],
            body,
        ) {
            Ok(response) => response,
            Err(TransportError::Status { code, body }) => {
                return match parse_json_response(&body) {
                    Err(error @ ApiError::DeviceError { .. }) => Err(error),
                    _ => Err(ApiError::HttpStatus(code)),
                };
            }
            Err(e) => return Err(e.into()),
        };

        parse_json_response(&response.body)
    }

    /// Execute a typed JSON-RPC operation
    pub fn execute<Op: BraviaOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let body = Op::build_body(request)?;
        let result = self.send_json(Op::SERVICE, &body).map_err(|e| {
            let meta = Op::metadata();
            if e.is_unreachable() {
                tracing::debug!(service = meta.service, method = meta.method, "no reaction from TV: {}", e);
            } else {
                tracing::warn!(service = meta.service, method = meta.method, "request failed: {}", e);
            }
            e
        })?;
        Op::parse_result(&result)
    }

    /// Replace the command table with the one the device reports
    ///
    /// Returns the number of commands loaded.
    pub fn refresh_commands(&mut self) -> Result<usize> {
        self.commands = self.execute::<GetRemoteControllerInfo>(&())?;
        tracing::debug!(count = self.commands.len(), "loaded remote controller commands");
        Ok(self.commands.len())
    }

    /// IR code the device reports for `name`
    ///
    /// An empty table is refreshed first. Unknown names, and lookups while
    /// the refresh fails, return `None`.
    pub fn command_code(&mut self, name: &str) -> Option<String> {
        if self.commands.is_empty() {
            if let Err(e) = self.refresh_commands() {
                tracing::debug!("could not load remote controller commands: {}", e);
            }
        }
        self.commands.get(name).map(str::to_string)
    }

    /// IR code for `command`: the device's entry, else the built-in code
    pub fn resolve(&mut self, command: IrCommand) -> String {
        self.command_code(command.name())
            .unwrap_or_else(|| command.default_code().to_string())
    }

    /// Press a remote-control button
    pub fn send_command(&mut self, command: IrCommand) -> Result<()> {
        let code = self.resolve(command);
        tracing::debug!(command = command.name(), "sending IR command");
        self.send_ircc(&code)?;
        Ok(())
    }

    pub fn get_power_status(&self) -> Result<PowerStatus> {
        self.execute::<GetPowerStatus>(&())
    }

    pub fn get_playing_info(&self) -> Result<PlayingContentInfo> {
        self.execute::<GetPlayingContentInfo>(&())
    }

    pub fn get_system_info(&self) -> Result<SystemInformation> {
        self.execute::<GetSystemInformation>(&())
    }

    /// The first network interface the device reports
    pub fn get_network_info(&self) -> Result<Option<NetworkInterface>> {
        Ok(self.execute::<GetNetworkSettings>(&())?.into_iter().next())
    }

    /// Volume of the built-in speakers
    pub fn get_volume_info(&self) -> Result<Option<VolumeInfo>> {
        Ok(self
            .execute::<GetVolumeInformation>(&())?
            .into_iter()
            .find(|output| output.target == SPEAKER_TARGET))
    }

    /// Set the speaker volume, `0..=100`
    ///
    /// Out-of-range levels are logged and ignored.
    pub fn set_volume_level(&self, level: u8) -> Result<()> {
        if level > 100 {
            tracing::warn!(level, "ignoring volume level outside 0..=100");
            return Ok(());
        }
        self.execute::<SetAudioVolume>(&SetAudioVolumeRequest {
            target: SPEAKER_TARGET.to_string(),
            volume: level.to_string(),
        })
    }

    pub fn play_content(&self, uri: &str) -> Result<()> {
        self.execute::<SetPlayContent>(&SetPlayContentRequest {
            uri: uri.to_string(),
        })
    }

    /// Switch to the source or channel titled `title`
    ///
    /// Returns `false` when no such title is in the source list.
    pub fn select_source(&self, title: &str) -> Result<bool> {
        match self.load_source_list().into_iter().find(|item| item.title == title) {
            Some(item) => {
                self.play_content(&item.uri)?;
                Ok(true)
            }
            None => {
                tracing::debug!(title, "source not found");
                Ok(false)
            }
        }
    }

    /// All tuner channels (cable and terrestrial) followed by the HDMI inputs
    ///
    /// Failures end the affected listing early and are logged; whatever was
    /// collected up to that point is returned.
    pub fn load_source_list(&self) -> Vec<ContentItem> {
        let mut items = Vec::new();

        match self.execute::<GetSourceList>(&GetSourceListRequest {
            scheme: "tv".to_string(),
        }) {
            Ok(sources) => {
                for source in sources.iter().filter(|s| TUNER_SOURCES.contains(&s.source.as_str())) {
                    items.extend(self.get_content(&source.source));
                }
            }
            Err(e) => tracing::debug!("could not list tuner sources: {}", e),
        }

        match self.execute::<GetSourceList>(&GetSourceListRequest {
            scheme: "extInput".to_string(),
        }) {
            Ok(sources) if sources.iter().any(|s| s.source == HDMI_SOURCE) => {
                match self.execute::<GetContentList>(&GetContentListRequest {
                    source: HDMI_SOURCE.to_string(),
                    st_idx: 0,
                }) {
                    Ok(inputs) => items.extend(inputs),
                    Err(e) => tracing::debug!("could not list HDMI inputs: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("could not list external inputs: {}", e),
        }

        items
    }

    /// Page through `getContentList` for one source
    fn get_content(&self, source: &str) -> Vec<ContentItem> {
        let mut items = Vec::new();
        let mut index = 0u32;

        loop {
            let page = match self.execute::<GetContentList>(&GetContentListRequest {
                source: source.to_string(),
                st_idx: index,
            }) {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!(source, index, "content listing stopped: {}", e);
                    break;
                }
            };

            let Some(last) = page.last() else {
                break;
            };
            let next = last.index.map_or(index + page.len() as u32, |i| i + 1);
            index = next.max(index + 1);
            items.extend(page);
        }

        items
    }

    /// Power on through Wake-on-LAN when a MAC address is configured,
    /// otherwise through [`turn_on_command`](Self::turn_on_command)
    pub fn turn_on(&mut self) -> Result<()> {
        match self.mac_address.clone() {
            Some(mac) => wol::wake(&mac),
            None => self.turn_on_command().map(|_| ()),
        }
    }

    /// Power on with the power IR code and `setPowerStatus`
    ///
    /// Nothing is sent when the set already reports `active`; returns whether
    /// the wake signals went out. A failed power poll counts as "not active".
    pub fn turn_on_command(&mut self) -> Result<bool> {
        let active = self
            .get_power_status()
            .map(|status| status.is_active())
            .unwrap_or(false);
        if active {
            tracing::debug!("TV already active, not sending power-on");
            return Ok(false);
        }

        if let Err(e) = self.send_command(IrCommand::Power) {
            tracing::debug!("power IR command failed: {}", e);
        }
        self.execute::<SetPowerStatus>(&SetPowerStatusRequest {
            status: "true".to_string(),
        })?;
        Ok(true)
    }

    pub fn turn_off(&mut self) -> Result<()> {
        self.send_command(IrCommand::PowerOff)
    }

    pub fn volume_up(&mut self) -> Result<()> {
        self.send_command(IrCommand::VolumeUp)
    }

    pub fn volume_down(&mut self) -> Result<()> {
        self.send_command(IrCommand::VolumeDown)
    }

    /// Toggle mute
    pub fn mute(&mut self) -> Result<()> {
        self.send_command(IrCommand::Mute)
    }

    pub fn play(&mut self) -> Result<()> {
        self.send_command(IrCommand::Play)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.send_command(IrCommand::Pause)
    }

    /// Pause live television (time-shift)
    pub fn tv_pause(&mut self) -> Result<()> {
        self.send_command(IrCommand::TvPause)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.send_command(IrCommand::Stop)
    }

    pub fn next(&mut self) -> Result<()> {
        self.send_command(IrCommand::Next)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.send_command(IrCommand::Prev)
    }

    /// Tear the client down, releasing the transport
    pub fn shutdown(self) {
        tracing::debug!(host = self.host(), "shutting down Bravia client");
    }
}
