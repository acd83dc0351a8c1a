//! Main menu items.

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Resume,
    SavePoint,
    LoadPoint,
    ZeroCal,
}

impl MenuItem {
    /// All items in display order.
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Resume,
        MenuItem::SavePoint,
        MenuItem::LoadPoint,
        MenuItem::ZeroCal,
    ];

    /// Item at a cursor index, clamped selection guaranteed by the caller.
    pub fn from_index(index: u8) -> MenuItem {
        Self::ALL[index as usize]
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Resume => "Resume",
            MenuItem::SavePoint => "Save Point",
            MenuItem::LoadPoint => "Load Point",
            MenuItem::ZeroCal => "Zero Cal",
        }
    }
}
