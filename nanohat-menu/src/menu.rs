//! The menu tree
//!
//! Built once at startup for the detected mode and never changed. Each node
//! is either an interior node with ordered children or a leaf bound to an
//! action. Destructive actions sit behind a two-entry Cancel/Confirm node so
//! confirmation reuses ordinary menu navigation.

use crate::actions::ActionId;
use crate::mode::Mode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Interior(Vec<MenuNode>),
    Leaf(ActionId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuNode {
    /// Display label, numeric prefix included
    pub name: String,
    pub kind: NodeKind,
}

impl MenuNode {
    #[must_use]
    pub fn leaf(name: &str, action: ActionId) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Leaf(action),
        }
    }

    #[must_use]
    pub fn interior(name: &str, children: Vec<MenuNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Interior(children),
        }
    }

    /// Cancel/Confirm gate in front of `action`
    #[must_use]
    pub fn gated(name: &str, action: ActionId) -> Self {
        Self::interior(
            name,
            vec![
                Self::leaf("Cancel", ActionId::Cancel),
                Self::leaf("Confirm", action),
            ],
        )
    }

    #[must_use]
    pub fn children(&self) -> Option<&[MenuNode]> {
        match &self.kind {
            NodeKind::Interior(children) => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    /// Title shown above the root level
    pub home: String,
    pub entries: Vec<MenuNode>,
}

impl Menu {
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        let mut actions = Vec::new();
        match mode {
            Mode::Classic => {
                actions.push(MenuNode::gated(
                    "Wconsole Mode",
                    ActionId::EnterMode(Mode::Wconsole),
                ));
                actions.push(MenuNode::gated(
                    "Hotspot Mode",
                    ActionId::EnterMode(Mode::Hotspot),
                ));
            }
            Mode::Wconsole | Mode::Hotspot => {
                actions.push(MenuNode::gated("Classic Mode", ActionId::LeaveMode(mode)));
            }
        }
        actions.push(MenuNode::gated("Reboot", ActionId::Reboot));
        actions.push(MenuNode::gated("Shutdown", ActionId::Shutdown));

        let entries = vec![
            MenuNode::interior(
                "Network",
                numbered(vec![
                    MenuNode::leaf("Interfaces", ActionId::Interfaces),
                    MenuNode::leaf("WLAN Interfaces", ActionId::WlanInterfaces),
                    MenuNode::leaf("USB Devices", ActionId::UsbDevices),
                    MenuNode::leaf("UFW Ports", ActionId::FirewallPorts),
                ]),
            ),
            MenuNode::interior(
                "Status",
                numbered(vec![
                    MenuNode::leaf("Summary", ActionId::Summary),
                    MenuNode::leaf("Date/Time", ActionId::DateTime),
                    MenuNode::leaf("Version", ActionId::Version),
                ]),
            ),
            MenuNode::interior("Actions", numbered(actions)),
        ];

        Self {
            home: mode.label().to_string(),
            entries: numbered(entries),
        }
    }

    /// Children of the interior node at `prefix` (root level for `[]`).
    #[must_use]
    pub fn level(&self, prefix: &[usize]) -> Option<&[MenuNode]> {
        let mut level: &[MenuNode] = &self.entries;
        for &index in prefix {
            level = level.get(index)?.children()?;
        }
        Some(level)
    }

    #[must_use]
    pub fn node(&self, path: &[usize]) -> Option<&MenuNode> {
        let (&last, prefix) = path.split_last()?;
        self.level(prefix)?.get(last)
    }
}

/// Prefix labels with their 1-based position: "1.Network"
fn numbered(nodes: Vec<MenuNode>) -> Vec<MenuNode> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, mut node)| {
            node.name = format!("{}.{}", i + 1, node.name);
            node
        })
        .collect()
}
