//! # Roster
//!
//! Contacts grouped the way the user filed them. The roster window renders
//! groups and their contacts as one flat, scrollable list where a folded
//! group hides its contacts.

use crate::core::room::Show;

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub jid: String,
    pub name: Option<String>,
    pub presence: Show,
}

impl Contact {
    pub fn new(jid: &str, name: Option<&str>, presence: Show) -> Self {
        Self {
            jid: jid.to_string(),
            name: name.map(str::to_string),
            presence,
        }
    }

    /// Bare address: the jid without its `/resource` part.
    pub fn bare_jid(&self) -> &str {
        self.jid.split('/').next().unwrap_or(&self.jid)
    }

    /// `name (jid)` when a name is set, the bare jid otherwise.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.bare_jid()),
            None => self.bare_jid().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterGroup {
    pub name: String,
    pub folded: bool,
    pub contacts: Vec<Contact>,
}

/// One line of the flattened roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RosterRow<'a> {
    Group(&'a RosterGroup),
    Contact(&'a Contact),
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub groups: Vec<RosterGroup>,
}

impl Roster {
    /// File `contact` under `group`, creating the group on first use.
    pub fn add_contact(&mut self, group: &str, contact: Contact) {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.contacts.push(contact),
            None => self.groups.push(RosterGroup {
                name: group.to_string(),
                folded: false,
                contacts: vec![contact],
            }),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.groups.iter().map(|g| g.contacts.len()).sum()
    }

    /// Groups and the contacts of unfolded groups, in display order.
    pub fn rows(&self) -> Vec<RosterRow<'_>> {
        let mut rows = Vec::new();
        for group in &self.groups {
            rows.push(RosterRow::Group(group));
            if !group.folded {
                rows.extend(group.contacts.iter().map(RosterRow::Contact));
            }
        }
        rows
    }

    pub fn find_contact(&self, jid: &str) -> Option<&Contact> {
        let bare = jid.split('/').next().unwrap_or(jid);
        self.groups
            .iter()
            .flat_map(|g| g.contacts.iter())
            .find(|c| c.bare_jid() == bare)
    }

    /// Update the presence of every entry for `jid`. Returns `true` if any matched.
    pub fn set_presence(&mut self, jid: &str, presence: Show) -> bool {
        let bare = jid.split('/').next().unwrap_or(jid).to_string();
        let mut found = false;
        for contact in self.groups.iter_mut().flat_map(|g| g.contacts.iter_mut()) {
            if contact.bare_jid() == bare {
                contact.presence = presence;
                found = true;
            }
        }
        found
    }

    /// Fold or unfold the group shown at `row`. No-op if that row is a contact.
    pub fn toggle_fold_at(&mut self, row: usize) {
        let mut idx = 0;
        for group in &mut self.groups {
            if idx == row {
                group.folded = !group.folded;
                return;
            }
            idx += 1;
            if !group.folded {
                idx += group.contacts.len();
            }
            if idx > row {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::default();
        roster.add_contact("Friends", Contact::new("alice@example.org", Some("Alice"), Show::Available));
        roster.add_contact("Friends", Contact::new("bob@example.org", None, Show::Away));
        roster.add_contact("Work", Contact::new("carol@corp.example", None, Show::Dnd));
        roster
    }

    #[test]
    fn test_display_name() {
        let c = Contact::new("alice@example.org/phone", Some("Alice"), Show::Available);
        assert_eq!(c.display_name(), "Alice (alice@example.org)");
        let c = Contact::new("bob@example.org", None, Show::Available);
        assert_eq!(c.display_name(), "bob@example.org");
    }

    #[test]
    fn test_rows_respect_folding() {
        let mut roster = roster();
        assert_eq!(roster.rows().len(), 5);
        roster.toggle_fold_at(0);
        assert!(roster.groups[0].folded);
        assert_eq!(roster.rows().len(), 3);
        assert!(matches!(roster.rows()[1], RosterRow::Group(g) if g.name == "Work"));
    }

    #[test]
    fn test_toggle_fold_on_contact_row_is_noop() {
        let mut roster = roster();
        roster.toggle_fold_at(1);
        assert!(roster.groups.iter().all(|g| !g.folded));
    }

    #[test]
    fn test_toggle_fold_second_group() {
        let mut roster = roster();
        roster.toggle_fold_at(3);
        assert!(roster.groups[1].folded);
        assert!(!roster.groups[0].folded);
    }

    #[test]
    fn test_set_presence_uses_bare_jid() {
        let mut roster = roster();
        assert!(roster.set_presence("bob@example.org/laptop", Show::Chat));
        assert_eq!(roster.find_contact("bob@example.org").map(|c| c.presence), Some(Show::Chat));
        assert!(!roster.set_presence("nobody@example.org", Show::Chat));
    }

    #[test]
    fn test_contact_count() {
        assert_eq!(roster().contact_count(), 3);
    }
}
