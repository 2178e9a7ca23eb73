use std::{error::Error, ffi::CString};

use hidapi::{HidApi, HidDevice};

use super::{
    hid_report::{build_delete_report, ProfileReportSet},
    profile::Profile,
    ProfileSlot,
};

pub const DS5_EDGE_NAME: &str = "Sony Interactive Entertainment DualSense Edge Wireless Controller";
pub const DS5_EDGE_VID: u16 = 0x054c;
pub const DS5_EDGE_PID: u16 = 0x0df2;

/// DualSense Edge profile configuration driver. Each profile write is
/// three feature reports delivered as SET_REPORT control transfers; the
/// transfer parameters are derived by hidapi from byte 0 of each packet.
pub struct Driver {
    device: HidDevice,
}

impl Driver {
    /// Open the first DualSense Edge controller found on the bus
    pub fn new() -> Result<Self, Box<dyn Error + Send + Sync>> {
        let api = HidApi::new()?;
        let info = api
            .device_list()
            .find(|info| info.vendor_id() == DS5_EDGE_VID && info.product_id() == DS5_EDGE_PID)
            .ok_or("No DualSense Edge controller found")?;
        let device = info.open_device(&api)?;
        log::debug!("Opened {DS5_EDGE_NAME}");

        Ok(Self { device })
    }

    /// Open the controller at the given hidraw path
    pub fn open_path(path: String) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let c_path = CString::new(path.clone())?;
        let api = HidApi::new()?;
        let device = api.open_path(&c_path)?;
        let info = device.get_device_info()?;
        let vid = info.vendor_id();
        let pid = info.product_id();
        if vid != DS5_EDGE_VID || pid != DS5_EDGE_PID {
            return Err(
                format!("Device '{path}' is not a DualSense Edge Controller: {vid}:{pid}").into(),
            );
        }

        Ok(Self { device })
    }

    /// Write `profile` into `slot`, overriding any profile already stored
    /// there. The device only accepts the write once all three packets
    /// have arrived in sequence order, so the first failed transfer
    /// aborts the transaction. There is no retry logic; assembly is pure,
    /// so a caller can simply run the write again.
    pub fn write_profile(
        &self,
        profile: &Profile,
        slot: ProfileSlot,
        slider: u8,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        profile.check_range(slider)?;
        let mut set = ProfileReportSet::assemble(profile, slot, slider)?;
        set.inject_checksum()?;

        for (i, packet) in set.packets().iter().enumerate() {
            log::debug!("Sending profile packet {i} ({} bytes)", packet.len());
            self.device.send_feature_report(packet)?;
        }
        log::info!(
            "Wrote profile '{}' to slot {}",
            profile.label(),
            slot.index()
        );

        Ok(())
    }

    /// Remove the profile stored in `slot`
    pub fn delete_profile(&self, slot: ProfileSlot) -> Result<(), Box<dyn Error + Send + Sync>> {
        let report = build_delete_report(slot);
        self.device.send_feature_report(&report)?;
        log::info!("Deleted profile in slot {}", slot.index());

        Ok(())
    }
}
