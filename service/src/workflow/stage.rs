//! Upgrade stage catalogue

use std::fmt;

/// The seven simulated stages of a firmware upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeStage {
    CheckDeviceCompatibility,
    PreUpgradeBackup,
    RebootDevice,
    MgmtPort,
    PostRebootChecks,
    DeviceActivation,
    PostActivationCheck,
}

impl UpgradeStage {
    /// Every stage in workflow order
    pub const ALL: [UpgradeStage; 7] = [
        UpgradeStage::CheckDeviceCompatibility,
        UpgradeStage::PreUpgradeBackup,
        UpgradeStage::RebootDevice,
        UpgradeStage::MgmtPort,
        UpgradeStage::PostRebootChecks,
        UpgradeStage::DeviceActivation,
        UpgradeStage::PostActivationCheck,
    ];

    /// Endpoint name, also used in operator logs
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeStage::CheckDeviceCompatibility => "check_device_compatibility",
            UpgradeStage::PreUpgradeBackup => "pre_upgrade_backup",
            UpgradeStage::RebootDevice => "reboot_device",
            UpgradeStage::MgmtPort => "mgmt_port",
            UpgradeStage::PostRebootChecks => "post_reboot_checks",
            UpgradeStage::DeviceActivation => "device_activation",
            UpgradeStage::PostActivationCheck => "vnf_spinup_and_config",
        }
    }

    /// Route the stage is served on
    pub fn route(&self) -> String {
        format!("/{}", self.name())
    }
}

impl fmt::Display for UpgradeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
