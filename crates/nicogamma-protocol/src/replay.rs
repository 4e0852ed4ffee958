use std::sync::Arc;

use nicogamma_persist::ThreadRecordStore;
use nicogamma_types::{ChatMessage, ThreadEvent, ThreadRequest};

use crate::clock::Clock;
use crate::error::Result;
use crate::packet::{serialize_packet, EscapeMode};
use crate::request::parse_request;

/// One element of the outgoing packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// `<thread ... />` marker. `last_res` is already rendered so a refresh
    /// can echo the client's numeral untouched.
    ThreadMarker { server_time: i64, last_res: String },

    /// `<chat ...>content</chat>`
    Chat(ChatMessage),
}

/// Result of replaying one request
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub thread_id: u64,
    pub server_time: i64,
    pub emissions: Vec<Emission>,
}

impl Replay {
    pub fn to_packet(&self, mode: EscapeMode) -> String {
        serialize_packet(self.thread_id, &self.emissions, mode)
    }
}

/// Decide what a request gets back from a recorded thread.
///
/// Refresh polls get a single marker echoing their own cursor. Fetches get
/// the whole log, 1:1 and in order; the magnitude of `res_from` never limits
/// how much is replayed.
pub fn select_emissions<I>(req: &ThreadRequest, events: I, server_time: i64) -> Vec<Emission>
where
    I: IntoIterator<Item = ThreadEvent>,
{
    if req.is_refresh() {
        return vec![Emission::ThreadMarker {
            server_time,
            last_res: req.res_from.as_str().to_string(),
        }];
    }

    events
        .into_iter()
        .map(|event| match event {
            ThreadEvent::ThreadMeta { last_res } => Emission::ThreadMarker {
                server_time,
                last_res: last_res.to_string(),
            },
            ThreadEvent::Chat(chat) => Emission::Chat(chat),
        })
        .collect()
}

/// Loads thread records and replays them against requests.
///
/// Stateless apart from its shared, read-only handles; one engine serves
/// any number of concurrent requests.
#[derive(Clone)]
pub struct ReplayEngine {
    store: Arc<dyn ThreadRecordStore>,
    clock: Arc<dyn Clock>,
}

impl ReplayEngine {
    pub fn new(store: Arc<dyn ThreadRecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Replay a parsed request.
    ///
    /// The record is loaded before the mode is chosen, so an unknown thread
    /// fails with `RecordNotFound` even for a refresh poll.
    pub async fn replay(&self, req: &ThreadRequest) -> Result<Replay> {
        let events = self.store.load_thread(req.thread_id).await?;
        // sampled once, shared by every marker in the packet
        let server_time = self.clock.now_unix();

        let emissions = select_emissions(req, events, server_time);
        tracing::debug!(
            thread_id = req.thread_id,
            res_from = %req.res_from,
            refresh = req.is_refresh(),
            emissions = emissions.len(),
            "Replayed thread"
        );

        Ok(Replay {
            thread_id: req.thread_id,
            server_time,
            emissions,
        })
    }

    /// Parse, replay and serialize in one step.
    pub async fn handle(&self, raw: &[u8], mode: EscapeMode) -> Result<String> {
        let req = parse_request(raw)?;
        let replay = self.replay(&req).await?;
        Ok(replay.to_packet(mode))
    }
}
