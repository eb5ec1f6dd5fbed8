//! Captured device frames, for exercising the channel without a device.
//!
//! Each capture is one complete frame as a real device would deliver it on
//! the TLS stream: length prefix plus protobuf envelope, sourced from
//! `receiver-0` toward `sender-0`. Pushed through a
//! [`ScriptedTransport`](crate::ScriptedTransport) they drive the ping and
//! availability exchanges end to end.

/// `PONG` on the heartbeat namespace.
pub const PONG_FRAME: &[u8] = &[
    0x00, 0x00, 0x00, 0x54, 0x08, 0x00, 0x12, 0x0a,
    0x72, 0x65, 0x63, 0x65, 0x69, 0x76, 0x65, 0x72,
    0x2d, 0x30, 0x1a, 0x08, 0x73, 0x65, 0x6e, 0x64,
    0x65, 0x72, 0x2d, 0x30, 0x22, 0x27, 0x75, 0x72,
    0x6e, 0x3a, 0x78, 0x2d, 0x63, 0x61, 0x73, 0x74,
    0x3a, 0x63, 0x6f, 0x6d, 0x2e, 0x67, 0x6f, 0x6f,
    0x67, 0x6c, 0x65, 0x2e, 0x63, 0x61, 0x73, 0x74,
    0x2e, 0x74, 0x70, 0x2e, 0x68, 0x65, 0x61, 0x72,
    0x74, 0x62, 0x65, 0x61, 0x74, 0x28, 0x00, 0x32,
    0x0f, 0x7b, 0x22, 0x74, 0x79, 0x70, 0x65, 0x22,
    0x3a, 0x22, 0x50, 0x4f, 0x4e, 0x47, 0x22, 0x7d,
];

/// `GET_APP_AVAILABILITY` response reporting application `02834648`
/// available, `requestId` 1.
pub const APP_AVAILABLE_FRAME: &[u8] = &[
    0x00, 0x00, 0x00, 0xa2, 0x08, 0x00, 0x12, 0x0a,
    0x72, 0x65, 0x63, 0x65, 0x69, 0x76, 0x65, 0x72,
    0x2d, 0x30, 0x1a, 0x08, 0x73, 0x65, 0x6e, 0x64,
    0x65, 0x72, 0x2d, 0x30, 0x22, 0x23, 0x75, 0x72,
    0x6e, 0x3a, 0x78, 0x2d, 0x63, 0x61, 0x73, 0x74,
    0x3a, 0x63, 0x6f, 0x6d, 0x2e, 0x67, 0x6f, 0x6f,
    0x67, 0x6c, 0x65, 0x2e, 0x63, 0x61, 0x73, 0x74,
    0x2e, 0x72, 0x65, 0x63, 0x65, 0x69, 0x76, 0x65,
    0x72, 0x28, 0x00, 0x32, 0x61, 0x7b, 0x22, 0x61,
    0x76, 0x61, 0x69, 0x6c, 0x61, 0x62, 0x69, 0x6c,
    0x69, 0x74, 0x79, 0x22, 0x3a, 0x7b, 0x22, 0x30,
    0x32, 0x38, 0x33, 0x34, 0x36, 0x34, 0x38, 0x22,
    0x3a, 0x22, 0x41, 0x50, 0x50, 0x5f, 0x41, 0x56,
    0x41, 0x49, 0x4c, 0x41, 0x42, 0x4c, 0x45, 0x22,
    0x7d, 0x2c, 0x22, 0x72, 0x65, 0x71, 0x75, 0x65,
    0x73, 0x74, 0x49, 0x64, 0x22, 0x3a, 0x31, 0x2c,
    0x22, 0x72, 0x65, 0x73, 0x70, 0x6f, 0x6e, 0x73,
    0x65, 0x54, 0x79, 0x70, 0x65, 0x22, 0x3a, 0x22,
    0x47, 0x45, 0x54, 0x5f, 0x41, 0x50, 0x50, 0x5f,
    0x41, 0x56, 0x41, 0x49, 0x4c, 0x41, 0x42, 0x49,
    0x4c, 0x49, 0x54, 0x59, 0x22, 0x7d,
];

/// The same response reporting the application unavailable.
pub const APP_UNAVAILABLE_FRAME: &[u8] = &[
    0x00, 0x00, 0x00, 0xa4, 0x08, 0x00, 0x12, 0x0a,
    0x72, 0x65, 0x63, 0x65, 0x69, 0x76, 0x65, 0x72,
    0x2d, 0x30, 0x1a, 0x08, 0x73, 0x65, 0x6e, 0x64,
    0x65, 0x72, 0x2d, 0x30, 0x22, 0x23, 0x75, 0x72,
    0x6e, 0x3a, 0x78, 0x2d, 0x63, 0x61, 0x73, 0x74,
    0x3a, 0x63, 0x6f, 0x6d, 0x2e, 0x67, 0x6f, 0x6f,
    0x67, 0x6c, 0x65, 0x2e, 0x63, 0x61, 0x73, 0x74,
    0x2e, 0x72, 0x65, 0x63, 0x65, 0x69, 0x76, 0x65,
    0x72, 0x28, 0x00, 0x32, 0x63, 0x7b, 0x22, 0x61,
    0x76, 0x61, 0x69, 0x6c, 0x61, 0x62, 0x69, 0x6c,
    0x69, 0x74, 0x79, 0x22, 0x3a, 0x7b, 0x22, 0x30,
    0x32, 0x38, 0x33, 0x34, 0x36, 0x34, 0x38, 0x22,
    0x3a, 0x22, 0x41, 0x50, 0x50, 0x5f, 0x55, 0x4e,
    0x41, 0x56, 0x41, 0x49, 0x4c, 0x41, 0x42, 0x4c,
    0x45, 0x22, 0x7d, 0x2c, 0x22, 0x72, 0x65, 0x71,
    0x75, 0x65, 0x73, 0x74, 0x49, 0x64, 0x22, 0x3a,
    0x31, 0x2c, 0x22, 0x72, 0x65, 0x73, 0x70, 0x6f,
    0x6e, 0x73, 0x65, 0x54, 0x79, 0x70, 0x65, 0x22,
    0x3a, 0x22, 0x47, 0x45, 0x54, 0x5f, 0x41, 0x50,
    0x50, 0x5f, 0x41, 0x56, 0x41, 0x49, 0x4c, 0x41,
    0x42, 0x49, 0x4c, 0x49, 0x54, 0x59, 0x22, 0x7d,
];
