#![allow(dead_code)]

use azel_rs::error::TransportError;
use azel_rs::{PlotRequest, PlotResponse, PlotService, ServiceReply, TargetNameError};
use std::sync::Mutex;

/// PNG signature, base64 encoded.
pub const PNG_B64: &str = "iVBORw0KGgo=";
pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

type Handler = dyn Fn(&PlotRequest) -> Result<ServiceReply, TransportError> + Send + Sync;

/// Plot service driven by a closure; remembers every request it saw.
pub struct FakeService {
    handler: Box<Handler>,
    seen: Mutex<Vec<PlotRequest>>,
}

impl FakeService {
    pub fn new(
        handler: impl Fn(&PlotRequest) -> Result<ServiceReply, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always answers 200 with a chart and no errors.
    pub fn always_ok() -> Self {
        Self::new(|_| Ok(ServiceReply::ok(image_body())))
    }

    pub fn requests(&self) -> Vec<PlotRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl PlotService for FakeService {
    fn generate(&self, request: &PlotRequest) -> Result<ServiceReply, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

pub fn image_body() -> PlotResponse {
    PlotResponse {
        image_data: Some(PNG_B64.to_string()),
        ..Default::default()
    }
}

pub fn target_error(name: &str, error: &str) -> TargetNameError {
    TargetNameError {
        name: name.to_string(),
        error: error.to_string(),
    }
}

pub fn names(req: &PlotRequest) -> Vec<&str> {
    req.targets.iter().map(|t| t.name.as_str()).collect()
}
