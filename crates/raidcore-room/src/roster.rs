//! Order-preserving room membership.

use raidcore_transport::ConnectionId;

/// The members of a room, in join order.
///
/// Join order is load-bearing: position 0 is the host, and the role
/// passes down the list as members leave. Insertion is idempotent so a
/// repeated join can never give one connection two positions.
#[derive(Debug, Default)]
pub struct Roster {
    members: Vec<ConnectionId>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Appends a member. Returns `false` if already present, keeping
    /// the original position.
    pub fn insert(&mut self, conn_id: ConnectionId) -> bool {
        if self.members.contains(&conn_id) {
            return false;
        }
        self.members.push(conn_id);
        true
    }

    /// Removes a member, closing the gap so later members move up.
    /// Returns `false` if the member was not present.
    pub fn remove(&mut self, conn_id: ConnectionId) -> bool {
        match self.members.iter().position(|member| *member == conn_id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// The host: the earliest member still present.
    pub fn host(&self) -> Option<ConnectionId> {
        self.members.first().copied()
    }

    pub fn contains(&self, conn_id: ConnectionId) -> bool {
        self.members.contains(&conn_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in join order.
    pub fn to_vec(&self) -> Vec<ConnectionId> {
        self.members.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.members.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    #[test]
    fn test_insert_preserves_join_order() {
        let mut roster = Roster::new();
        assert!(roster.insert(conn(3)));
        assert!(roster.insert(conn(1)));
        assert!(roster.insert(conn(2)));
        assert_eq!(roster.to_vec(), vec![conn(3), conn(1), conn(2)]);
        assert_eq!(roster.host(), Some(conn(3)));
    }

    #[test]
    fn test_duplicate_insert_keeps_position() {
        let mut roster = Roster::new();
        roster.insert(conn(1));
        roster.insert(conn(2));
        assert!(!roster.insert(conn(1)));
        assert_eq!(roster.to_vec(), vec![conn(1), conn(2)]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_remove_promotes_next_member() {
        let mut roster = Roster::new();
        roster.insert(conn(1));
        roster.insert(conn(2));
        roster.insert(conn(3));
        assert!(roster.remove(conn(1)));
        assert_eq!(roster.host(), Some(conn(2)));
        assert_eq!(roster.to_vec(), vec![conn(2), conn(3)]);
    }

    #[test]
    fn test_remove_absent_member() {
        let mut roster = Roster::new();
        roster.insert(conn(1));
        assert!(!roster.remove(conn(9)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_empty_roster_has_no_host() {
        let mut roster = Roster::new();
        assert_eq!(roster.host(), None);
        assert!(roster.is_empty());
        roster.insert(conn(1));
        roster.remove(conn(1));
        assert_eq!(roster.host(), None);
    }
}
