use neuronet_core::NodeId;

/// Map a signed node id onto the core id space.
///
/// Negative and oversized ids have no node; callers treat `None` as an
/// out-of-range start and return an empty result.
pub fn node_from_signed(id: i64) -> Option<NodeId> {
    NodeId::try_from(id).ok()
}

/// Clamp a signed hop bound: negative depths explore nothing.
pub fn depth_from_signed(depth: i64) -> u32 {
    u32::try_from(depth.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_from_signed() {
        assert_eq!(node_from_signed(0), Some(0));
        assert_eq!(node_from_signed(42), Some(42));
        assert_eq!(node_from_signed(-1), None);
        assert_eq!(node_from_signed(i64::from(u32::MAX) + 1), None);
    }

    #[test]
    fn test_depth_from_signed() {
        assert_eq!(depth_from_signed(3), 3);
        assert_eq!(depth_from_signed(0), 0);
        assert_eq!(depth_from_signed(-5), 0);
        assert_eq!(depth_from_signed(i64::MAX), u32::MAX);
    }
}
