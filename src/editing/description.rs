use super::ItemEditor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionEdit {
    pub buffer: String,
    pub updating: bool,
}

impl ItemEditor {
    pub fn description_edit(&self) -> Option<&DescriptionEdit> {
        self.description.as_ref()
    }

    pub fn begin_description_edit(&mut self) {
        if self.description.is_none() {
            self.description = Some(DescriptionEdit {
                buffer: self.source.description.clone(),
                updating: false,
            });
        }
    }

    pub fn set_description_buffer(&mut self, text: &str) {
        if let Some(d) = self.description.as_mut()
            && !d.updating
        {
            d.buffer = text.to_string();
        }
    }

    /// Drops the edit; the buffer is rebuilt from the record next time.
    pub fn cancel_description_edit(&mut self) {
        if self.description.as_ref().is_some_and(|d| !d.updating) {
            self.description = None;
        }
    }

    /// Marks the edit as in flight and returns `(id, text)` for the list
    /// owner to send. `None` while another save is running.
    pub fn begin_save_description(&mut self) -> Option<(String, String)> {
        let d = self.description.as_mut()?;
        if d.updating {
            return None;
        }
        d.updating = true;
        Some((self.full_record.id.clone(), d.buffer.clone()))
    }

    /// Closes the edit once the list owner's update settled, whatever the
    /// outcome; failures are reported by the list owner.
    pub fn finish_description_save(&mut self) {
        self.description = None;
    }
}
