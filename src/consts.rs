//! Internal constants, protocol sizes and default settings.

// --- Hardware Monitor (command transfer over XU) ---
pub mod hw_monitor {
    /// Fixed size of the XU buffer used for command/response exchange.
    pub const BUFFER_SIZE: usize = 1024;
    /// Offset of the little-endian u32 holding the response payload size.
    pub const DATA_SIZE_OFFSET: usize = 1020;
    /// Bytes preceding the payload in a response (echoed op code).
    pub const HEADER_SIZE: usize = 4;

    /// Magic number placed after the length field of every request frame.
    pub const MAGIC: u16 = 0xCDAB;
    // Len(2) + Magic(2) + OpCode(4) + Param1..4(16)
    pub const REQUEST_HEADER_SIZE: usize = 24;
    pub const DEFAULT_TIMEOUT_MS: u32 = 5000;
}

// --- Firmware Logger ---
pub mod fw_log {
    use std::time::Duration;

    /// Prefix of every emitted firmware log line.
    pub const LINE_TAG: &str = "FW_Log_Data:";
    /// "GLD" (get log data) op code used by most D4xx-class firmware.
    pub const DEFAULT_OP_CODE: u8 = 0x0F;
    pub const DEFAULT_PAYLOAD_SIZE: u32 = 500;
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
    pub const THREAD_NAME: &str = "fw-logger";
}

// --- Power Line Frequency value labels (UVC PU_POWER_LINE_FREQUENCY_CONTROL) ---
pub mod power_line {
    pub const DISABLED: i32 = 0;
    pub const HZ_50: i32 = 1;
    pub const HZ_60: i32 = 2;
    pub const AUTO: i32 = 3;
}
