//! Feature report layouts for the DualSense Edge custom profile pages.
//! Field offsets and template values come from USB captures of profile
//! writes issued by the official PS5 profile editor; bytes with no known
//! meaning are carried verbatim so an assembled set matches a factory
//! profile byte for byte.

use packed_struct::prelude::*;

use super::{profile::Profile, ProfileSlot, ReportError};

/// Report id of the delete-profile feature report
pub const REPORT_ID_DELETE_PROFILE: u8 = 0x68;

/// Size of each profile-write packet as assembled
pub const PROFILE_REPORT_SIZE: usize = 64;
/// Size of the final packet once the checksum and padding are appended.
/// The last transfer of a write transaction is longer than the others;
/// the device expects the oversized packet.
pub const PROFILE_REPORT_FINAL_SIZE: usize = PROFILE_REPORT_SIZE + 8;
/// Number of packets in one profile-write transaction
pub const PROFILE_REPORT_COUNT: usize = 3;

/// Maximum number of characters in a profile label
pub const LABEL_MAX_CHARS: usize = 40;
/// Size of the encoded label buffer
pub const LABEL_ENCODED_SIZE: usize = 80;
/// Encoded label bytes carried by packet 0; the remainder goes to packet 1
pub const LABEL_SPLIT: usize = 54;

/// Header bytes excluded from the checksum on every packet
const CHECKSUM_SKIP_HEADER: usize = 2;
/// Trailer bytes excluded from the checksum on every non-final packet
const CHECKSUM_SKIP_TRAILER: usize = 4;

/// First packet of a profile write: format header and the label head
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "64")]
pub struct ProfileHeaderReport {
    #[packed_field(bytes = "0")]
    pub report_id: u8,
    #[packed_field(bytes = "1")]
    pub sequence: u8,
    /// Page format marker, 0x01 in every capture
    #[packed_field(bytes = "2")]
    pub format: u8,
    #[packed_field(bytes = "3..=5")]
    pub unknown: [u8; 3],
    /// First [LABEL_SPLIT] bytes of the encoded label
    #[packed_field(bytes = "6..=59")]
    pub label_head: [u8; 54],
    /// Excluded from the checksum
    #[packed_field(bytes = "60..=63")]
    pub reserved: [u8; 4],
}

impl Default for ProfileHeaderReport {
    fn default() -> Self {
        Self {
            report_id: 0,
            sequence: 0,
            format: 0x01,
            unknown: [0; 3],
            label_head: [0; 54],
            reserved: [0; 4],
        }
    }
}

/// Second packet: label tail and per-stick dead-zone/response-curve bytes
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "64")]
pub struct ProfileCurvesReport {
    #[packed_field(bytes = "0")]
    pub report_id: u8,
    #[packed_field(bytes = "1")]
    pub sequence: u8,
    /// Remaining bytes of the encoded label
    #[packed_field(bytes = "2..=27")]
    pub label_tail: [u8; 26],
    /// Left stick dead-zone and response curve control points
    #[packed_field(bytes = "28..=35")]
    pub left_stick_curve: [u8; 8],
    /// Right stick dead-zone and response curve control points
    #[packed_field(bytes = "36..=43")]
    pub right_stick_curve: [u8; 8],
    #[packed_field(bytes = "44..=59")]
    pub unknown: [u8; 16],
    /// Excluded from the checksum
    #[packed_field(bytes = "60..=63")]
    pub reserved: [u8; 4],
}

impl Default for ProfileCurvesReport {
    fn default() -> Self {
        Self {
            report_id: 0,
            sequence: 1,
            label_tail: [0; 26],
            left_stick_curve: [0x7e, 0x05, 0x28, 0x42, 0x8a, 0x5d, 0x42, 0x4e],
            right_stick_curve: [0xa6, 0xa8, 0xcd, 0xce, 0x85, 0x54, 0x22, 0x43],
            unknown: [0; 16],
            reserved: [0; 4],
        }
    }
}

/// Third packet: trigger ranges, button mapping, stick response mode and
/// the creation timestamp. The checksum region stays zero-filled until
/// [ProfileReportSet::inject_checksum] runs.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "64")]
pub struct ProfileMappingReport {
    #[packed_field(bytes = "0")]
    pub report_id: u8,
    #[packed_field(bytes = "1")]
    pub sequence: u8,
    #[packed_field(bytes = "2..=3")]
    pub unknown0: [u8; 2],
    /// L2 trigger active range
    #[packed_field(bytes = "4")]
    pub l2_min: u8,
    #[packed_field(bytes = "5")]
    pub l2_max: u8,
    /// R2 trigger active range
    #[packed_field(bytes = "6")]
    pub r2_min: u8,
    #[packed_field(bytes = "7")]
    pub r2_max: u8,
    #[packed_field(bytes = "8..=10")]
    pub unknown1: [u8; 3],
    /// Physical-to-logical button assignment, identity by default
    #[packed_field(bytes = "11..=25")]
    pub button_map: [u8; 15],
    #[packed_field(bytes = "26..=27")]
    pub unknown2: [u8; 2],
    /// Joystick response mode flags
    #[packed_field(bytes = "28")]
    pub stick_mode: u8,
    #[packed_field(bytes = "29..=33")]
    pub unknown3: [u8; 5],
    /// Creation timestamp bytes as captured from the official editor.
    /// Kept constant so assembly stays deterministic.
    #[packed_field(bytes = "34..=36")]
    pub timestamp: [u8; 3],
    /// Constant in every observed capture
    #[packed_field(bytes = "37..=39")]
    pub unknown4: [u8; 3],
    /// Zero-filled placeholder; the checksum is appended past byte 63
    #[packed_field(bytes = "40..=63")]
    pub checksum_region: [u8; 24],
}

impl Default for ProfileMappingReport {
    fn default() -> Self {
        Self {
            report_id: 0,
            sequence: 2,
            unknown0: [0; 2],
            l2_min: 0x00,
            l2_max: 0xff,
            r2_min: 0x00,
            r2_max: 0xff,
            unknown1: [0; 3],
            button_map: [
                0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
                0x0e, 0x0f,
            ],
            unknown2: [0; 2],
            stick_mode: 0xc0,
            unknown3: [0; 5],
            timestamp: [0x1c, 0x55, 0xbb],
            unknown4: [0x05, 0x87, 0x01],
            checksum_region: [0; 24],
        }
    }
}

/// Encode a profile label into its on-wire form.
///
/// Character codes occupy even offsets and odd offsets stay zero, which
/// is UTF-16LE for the ASCII names the editor allows. Names longer than
/// [LABEL_MAX_CHARS] are silently truncated, and only the low byte of
/// each character code is written.
pub fn encode_label(name: &str) -> [u8; LABEL_ENCODED_SIZE] {
    let mut encoded = [0; LABEL_ENCODED_SIZE];
    for (i, character) in name.chars().take(LABEL_MAX_CHARS).enumerate() {
        encoded[2 * i] = character as u8;
    }
    encoded
}

/// Build the feature report that deletes the profile stored in `slot`.
///
/// The sequence byte counts down from the end of the on-device slot
/// list: slot 0 maps to 4, slot 2 to 2.
pub fn build_delete_report(slot: ProfileSlot) -> [u8; PROFILE_REPORT_SIZE] {
    let mut report = [0; PROFILE_REPORT_SIZE];
    report[0] = REPORT_ID_DELETE_PROFILE;
    report[1] = 4 - slot.index();
    report
}

/// One profile-write transaction: the packets sent to the device in
/// sequence order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReportSet {
    packets: Vec<Vec<u8>>,
}

impl ProfileReportSet {
    /// Assemble the packets for `profile` targeting `slot`, with every
    /// curve adjustment evaluated at slider position `slider`.
    ///
    /// Assembly is pure: the same inputs always produce the same bytes,
    /// and the checksum region of the final packet is left zero-filled
    /// for [Self::inject_checksum].
    pub fn assemble(
        profile: &Profile,
        slot: ProfileSlot,
        slider: u8,
    ) -> Result<Self, ReportError> {
        let label = encode_label(profile.label());

        let mut header = ProfileHeaderReport {
            report_id: slot.report_id(),
            ..Default::default()
        };
        header.label_head.copy_from_slice(&label[..LABEL_SPLIT]);

        let mut curves = ProfileCurvesReport {
            report_id: slot.report_id(),
            ..Default::default()
        };
        curves.label_tail.copy_from_slice(&label[LABEL_SPLIT..]);

        let mut mapping = ProfileMappingReport {
            report_id: slot.report_id(),
            ..Default::default()
        };

        // Evaluated values fill the stick curve bytes of packet 1 first,
        // then the trigger range bytes of packet 2. Positions without a
        // supplied adjustment keep their template defaults. Each value
        // contributes its low byte only; [Profile::check_range] is the
        // guard against out-of-range values reaching the device.
        for (i, value) in profile.evaluate_all(slider).into_iter().enumerate() {
            let byte = value as u8;
            match i {
                0..=7 => curves.left_stick_curve[i] = byte,
                8..=15 => curves.right_stick_curve[i - 8] = byte,
                16 => mapping.l2_min = byte,
                17 => mapping.l2_max = byte,
                18 => mapping.r2_min = byte,
                19 => mapping.r2_max = byte,
                _ => break,
            }
        }

        let packets = vec![
            header.pack()?.to_vec(),
            curves.pack()?.to_vec(),
            mapping.pack()?.to_vec(),
        ];
        Ok(Self { packets })
    }

    /// Build a set from raw packets, e.g. replayed from a capture
    pub fn from_packets(packets: Vec<Vec<u8>>) -> Self {
        Self { packets }
    }

    /// Packets in transmission order
    pub fn packets(&self) -> &[Vec<u8>] {
        &self.packets
    }

    /// Compute the checksum over the assembled packets and append it to
    /// the final packet, low byte first, followed by four zero bytes.
    ///
    /// Every packet contributes its bytes without the two-byte header;
    /// non-final packets additionally drop their four reserved trailer
    /// bytes. Excluding the headers leaves the checksum independent of
    /// the slot the set targets.
    pub fn inject_checksum(&mut self) -> Result<(), ReportError> {
        if self.packets.len() < PROFILE_REPORT_COUNT {
            return Err(ReportError::IncompletePacketSet {
                got: self.packets.len(),
            });
        }

        let last = self.packets.len() - 1;
        let mut hasher = crc32fast::Hasher::new();
        for (i, packet) in self.packets.iter().enumerate() {
            let end = if i == last {
                packet.len()
            } else {
                packet.len() - CHECKSUM_SKIP_TRAILER
            };
            hasher.update(&packet[CHECKSUM_SKIP_HEADER..end]);
        }
        let checksum = hasher.finalize();

        let final_packet = &mut self.packets[last];
        final_packet.extend_from_slice(&checksum.to_le_bytes());
        final_packet.extend_from_slice(&[0; 4]);
        Ok(())
    }
}
