//! Input events carried through the event register

/// Kind of a queued input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// VFO encoder moved; payload is a signed step count
    VfoStep,
    /// Ordinary encoder moved; payload packs encoder number and steps
    EncoderStep,
    /// Button pressed; payload is the report code
    ButtonPress,
    /// Button held past the long-press threshold
    ButtonLongPress,
    /// Button released
    ButtonRelease,
}

// Wire format values (bits 8..11 of the event word)
const KIND_NONE: u8 = 0;
const KIND_VFO_STEP: u8 = 1;
const KIND_ENCODER_STEP: u8 = 2;
const KIND_BUTTON_PRESS: u8 = 3;
const KIND_BUTTON_LONG_PRESS: u8 = 4;
const KIND_BUTTON_RELEASE: u8 = 5;

impl EventKind {
    /// Parse a kind from its wire nibble; 0 means "no event"
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            KIND_NONE => None,
            KIND_VFO_STEP => Some(EventKind::VfoStep),
            KIND_ENCODER_STEP => Some(EventKind::EncoderStep),
            KIND_BUTTON_PRESS => Some(EventKind::ButtonPress),
            KIND_BUTTON_LONG_PRESS => Some(EventKind::ButtonLongPress),
            KIND_BUTTON_RELEASE => Some(EventKind::ButtonRelease),
            _ => None,
        }
    }

    /// Convert to wire nibble
    pub fn to_nibble(self) -> u8 {
        match self {
            EventKind::VfoStep => KIND_VFO_STEP,
            EventKind::EncoderStep => KIND_ENCODER_STEP,
            EventKind::ButtonPress => KIND_BUTTON_PRESS,
            EventKind::ButtonLongPress => KIND_BUTTON_LONG_PRESS,
            EventKind::ButtonRelease => KIND_BUTTON_RELEASE,
        }
    }

    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, EventKind::VfoStep | EventKind::EncoderStep)
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            EventKind::ButtonPress | EventKind::ButtonLongPress | EventKind::ButtonRelease
        )
    }
}

/// One queued event: a kind plus an 8-bit payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelEvent {
    pub kind: EventKind,
    pub data: u8,
}

impl PanelEvent {
    pub const fn new(kind: EventKind, data: u8) -> Self {
        Self { kind, data }
    }

    /// VFO movement; the step count is sent as a two's complement byte
    pub fn vfo_step(steps: i8) -> Self {
        Self::new(EventKind::VfoStep, steps as u8)
    }

    /// Encoder movement: encoder number in the high nibble, steps in the low
    ///
    /// Steps are truncated to a signed nibble; the scheduler consumes every
    /// tick so a real encoder never gets near ±8 between reads.
    pub fn encoder_step(encoder: u8, steps: i8) -> Self {
        let data = ((encoder & 0x0F) << 4) | (steps as u8 & 0x0F);
        Self::new(EventKind::EncoderStep, data)
    }

    pub fn press(report_code: u8) -> Self {
        Self::new(EventKind::ButtonPress, report_code)
    }

    pub fn long_press(report_code: u8) -> Self {
        Self::new(EventKind::ButtonLongPress, report_code)
    }

    pub fn release(report_code: u8) -> Self {
        Self::new(EventKind::ButtonRelease, report_code)
    }

    /// Pack into the 12-bit queue entry (kind in bits 8..11, data in 0..7)
    pub fn to_word(self) -> u16 {
        ((self.kind.to_nibble() as u16) << 8) | self.data as u16
    }

    /// Unpack a queue entry; `None` for the "no event" kind
    pub fn from_word(word: u16) -> Option<Self> {
        let kind = EventKind::from_nibble(((word >> 8) & 0x0F) as u8)?;
        Some(Self::new(kind, word as u8))
    }

    /// Decode the payload of an encoder step event
    pub fn as_encoder_step(&self) -> Option<EncoderStep> {
        match self.kind {
            EventKind::EncoderStep => {
                // Sign-extend the low nibble
                let steps = ((self.data << 4) as i8) >> 4;
                Some(EncoderStep {
                    encoder: self.data >> 4,
                    steps,
                })
            }
            _ => None,
        }
    }

    /// Decode the payload of a VFO step event
    pub fn as_vfo_steps(&self) -> Option<i8> {
        match self.kind {
            EventKind::VfoStep => Some(self.data as i8),
            _ => None,
        }
    }
}

/// Decoded encoder step payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderStep {
    /// Logical encoder number (0..=11)
    pub encoder: u8,
    /// Signed step count (-8..=7)
    pub steps: i8,
}

/// Event register response as seen by the host
///
/// Bits 12..15 carry the number of entries the queue held when the read was
/// served, including the returned one, so `depth > 1` tells the host to
/// read again without looking at the ready line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventResponse {
    pub event: Option<PanelEvent>,
    pub depth: u8,
}

impl EventResponse {
    /// The response to a read of an empty queue
    pub const EMPTY: Self = Self {
        event: None,
        depth: 0,
    };

    pub fn new(event: PanelEvent, depth: u8) -> Self {
        Self {
            event: Some(event),
            depth,
        }
    }

    /// Encode as the 16-bit register word
    pub fn encode(&self) -> u16 {
        match self.event {
            Some(event) => event.to_word() | (((self.depth & 0x0F) as u16) << 12),
            None => 0,
        }
    }

    /// Decode a 16-bit register word read by the host
    pub fn decode(word: u16) -> Self {
        match PanelEvent::from_word(word & 0x0FFF) {
            Some(event) => Self {
                event: Some(event),
                depth: (word >> 12) as u8,
            },
            None => Self::EMPTY,
        }
    }

    /// Returns true if the host should read the event register again
    pub fn more_pending(&self) -> bool {
        self.depth > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_nibbles() {
        assert_eq!(EventKind::VfoStep.to_nibble(), 1);
        assert_eq!(EventKind::EncoderStep.to_nibble(), 2);
        assert_eq!(EventKind::ButtonPress.to_nibble(), 3);
        assert_eq!(EventKind::ButtonLongPress.to_nibble(), 4);
        assert_eq!(EventKind::ButtonRelease.to_nibble(), 5);
        assert!(EventKind::from_nibble(0).is_none());
        assert!(EventKind::from_nibble(6).is_none());
    }

    #[test]
    fn test_event_word_layout() {
        assert_eq!(PanelEvent::press(7).to_word(), 0x0307);
        assert_eq!(PanelEvent::release(41).to_word(), 0x0529);
        assert_eq!(PanelEvent::vfo_step(-1).to_word(), 0x01FF);
    }

    #[test]
    fn test_encoder_step_packing() {
        let event = PanelEvent::encoder_step(9, -2);
        assert_eq!(event.data, 0x9E);
        assert_eq!(
            event.as_encoder_step(),
            Some(EncoderStep {
                encoder: 9,
                steps: -2
            })
        );

        let event = PanelEvent::encoder_step(11, 3);
        assert_eq!(event.data, 0xB3);
        assert_eq!(event.as_encoder_step().unwrap().steps, 3);
        assert!(PanelEvent::press(3).as_encoder_step().is_none());
    }

    #[test]
    fn test_vfo_steps_sign() {
        assert_eq!(PanelEvent::vfo_step(-5).as_vfo_steps(), Some(-5));
        assert_eq!(PanelEvent::vfo_step(100).as_vfo_steps(), Some(100));
    }

    #[test]
    fn test_response_word() {
        let response = EventResponse::new(PanelEvent::press(7), 3);
        assert_eq!(response.encode(), 0x3307);
        assert_eq!(EventResponse::decode(0x3307), response);
        assert!(response.more_pending());
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(EventResponse::EMPTY.encode(), 0);
        assert_eq!(EventResponse::decode(0), EventResponse::EMPTY);
        assert!(!EventResponse::EMPTY.more_pending());
    }

    #[test]
    fn test_last_event_not_pending() {
        let response = EventResponse::new(PanelEvent::long_press(12), 1);
        assert_eq!(response.encode(), 0x140C);
        assert!(!response.more_pending());
    }
}
