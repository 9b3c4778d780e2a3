//! A history of operations performed on a shared object.
use std::collections::HashMap;
use std::iter::repeat_with;
use std::ops::Index;

/// An identifier for an entry in a history.
pub type EntryId = usize;

/// An identifier for the process that performed an action.
pub type ProcessId = usize;

/// An action performed by a process.
///
/// Each operation is represented by a pair of actions: the `Call` that
/// starts it and the `Response` that finishes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    Call(T),
    Response(T),
}

/// The entry for the call of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallEntry<T> {
    pub id: EntryId,
    pub operation: T,
    /// The id of the corresponding response entry.
    pub response: EntryId,
}

/// The entry for the response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry<T> {
    pub id: EntryId,
    pub operation: T,
}

/// An entry in a history.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Call(CallEntry<T>),
    Response(ResponseEntry<T>),
}

impl<T> Entry<T> {
    pub fn id(&self) -> EntryId {
        match self {
            Entry::Call(entry) => entry.id,
            Entry::Response(entry) => entry.id,
        }
    }
}

/// A history of operations performed on a shared object.
///
/// Entries can be temporarily removed from a history with [`History::lift`],
/// and put back again with [`History::unlift`].
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    entries: Vec<Entry<T>>,
    // When an entry is removed from this history, its index is recorded here.
    removed_from: Vec<Option<usize>>,
}

impl<T> History<T> {
    /// Creates a history from a sequence of actions, in the order in which
    /// they occurred.
    ///
    /// Each process performs operations one at a time, so the response of
    /// a process is paired with the most recent call of that process.
    ///
    /// # Panics
    ///
    /// Panics if a process calls an operation while a previous one is still
    /// pending, responds without a pending call, or never responds to a call.
    pub fn from_actions(actions: Vec<(ProcessId, Action<T>)>) -> Self {
        let mut pending: HashMap<ProcessId, EntryId> = HashMap::new();
        let mut responses: Vec<Option<EntryId>> = vec![None; actions.len()];
        for (id, (process, action)) in actions.iter().enumerate() {
            match action {
                Action::Call(_) => {
                    if pending.insert(*process, id).is_some() {
                        panic!("Process {process} called an operation while another was pending");
                    }
                }
                Action::Response(_) => match pending.remove(process) {
                    Some(call) => responses[call] = Some(id),
                    None => panic!("Process {process} responded without a pending call"),
                },
            }
        }

        let num_entries = actions.len();
        let entries = actions
            .into_iter()
            .enumerate()
            .map(|(id, (process, action))| match action {
                Action::Call(operation) => match responses[id] {
                    Some(response) => Entry::Call(CallEntry {
                        id,
                        operation,
                        response,
                    }),
                    None => panic!("Operation called by process {process} never responded"),
                },
                Action::Response(operation) => Entry::Response(ResponseEntry { id, operation }),
            });

        Self {
            entries: entries.collect(),
            removed_from: repeat_with(|| None).take(num_entries).collect(),
        }
    }

    /// Returns the current index of the entry with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the entry is not in the history.
    pub fn index_of_id(&self, id: EntryId) -> usize {
        match self.iter().position(|entry| entry.id() == id) {
            Some(index) => index,
            None => panic!("Entry {id} is not in the history"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes the call entry at index `i`, along with its response.
    ///
    /// # Panics
    ///
    /// Panics if the entry at index `i` is not a call.
    pub fn lift(&mut self, i: usize) -> (Entry<T>, Entry<T>) {
        let call = self.remove(i);
        let response = match &call {
            Entry::Call(entry) => self.index_of_id(entry.response),
            Entry::Response(entry) => panic!("Cannot lift response entry {}", entry.id),
        };
        let response = self.remove(response);
        (call, response)
    }

    /// Re-inserts a call and response that were previously lifted, returning
    /// the indices they were inserted at.
    ///
    /// Entries must be unlifted in the reverse order in which they were lifted.
    pub fn unlift(&mut self, call: Entry<T>, response: Entry<T>) -> (usize, usize) {
        let response_index = self.insert(response);
        let call_index = self.insert(call);
        (call_index, response_index)
    }

    /// # Panics
    ///
    /// Panics if input entry was not previously removed from the history.
    fn insert(&mut self, entry: Entry<T>) -> usize {
        match self.removed_from[entry.id()].take() {
            Some(index) => {
                self.entries.insert(index, entry);
                index
            }
            None => panic!("Index that entry {} was removed from is unknown", entry.id()),
        }
    }

    fn remove(&mut self, i: usize) -> Entry<T> {
        let entry = self.entries.remove(i);
        self.removed_from[entry.id()] = Some(i);
        entry
    }
}

impl<T> Index<usize> for History<T> {
    type Output = Entry<T>;

    fn index(&self, i: usize) -> &Self::Output {
        self.entries.index(i)
    }
}
