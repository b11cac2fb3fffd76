use super::{decode, Envelope, Mapper};
use crate::error::Result;
use crate::types::{OrderId, OrderNote, SiteId};

/// Maps the note returned by the add-note endpoint.
#[derive(Debug, Clone, Copy)]
pub struct OrderNoteMapper {
    pub site_id: SiteId,
    pub order_id: OrderId,
}

impl Mapper for OrderNoteMapper {
    type Output = OrderNote;

    fn map(&self, response: &[u8]) -> Result<OrderNote> {
        let mut note = decode::<Envelope<OrderNote>>(response)?.data;
        note.site_id = self.site_id;
        note.order_id = self.order_id;
        Ok(note)
    }
}

/// Maps the note list of one order.
#[derive(Debug, Clone, Copy)]
pub struct OrderNotesMapper {
    pub site_id: SiteId,
    pub order_id: OrderId,
}

impl Mapper for OrderNotesMapper {
    type Output = Vec<OrderNote>;

    fn map(&self, response: &[u8]) -> Result<Vec<OrderNote>> {
        let mut notes = decode::<Envelope<Vec<OrderNote>>>(response)?.data;
        for note in &mut notes {
            note.site_id = self.site_id;
            note.order_id = self.order_id;
        }
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_notes_with_parent_identifiers() {
        let notes = OrderNotesMapper { site_id: 123, order_id: 963 }
            .map(include_bytes!("../../fixtures/order-notes.json"))
            .unwrap();

        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|n| n.site_id == 123 && n.order_id == 963));
        assert!(notes[0].is_customer_note);
        assert!(!notes[1].is_customer_note);
        assert_eq!(notes[2].author, "system");
    }

    #[test]
    fn maps_new_note() {
        let note = OrderNoteMapper { site_id: 123, order_id: 963 }
            .map(include_bytes!("../../fixtures/new-order-note.json"))
            .unwrap();

        assert_eq!(note.note_id, 2261);
        assert_eq!(note.note, "This order would be so much better with ketchup.");
        assert!(note.is_customer_note);
    }
}
