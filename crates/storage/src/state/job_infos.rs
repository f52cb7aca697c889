// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job info event handlers.

use ji_core::Event;

use super::MaterializedState;

pub(crate) fn apply(state: &mut MaterializedState, event: &Event) {
    match event {
        Event::JobInfoCreated {
            id,
            date_ms,
            fields,
        } => {
            // Records are immutable: a replayed create never overwrites
            if state.job_infos.contains_key(id.as_str()) {
                return;
            }
            let info = fields.clone().into_record_at(id.clone(), *date_ms);
            state.index.insert(&info);
            state.job_infos.insert(id.to_string(), info);
        }

        Event::JobInfoDeleted { id } => {
            if let Some(info) = state.job_infos.remove(id.as_str()) {
                state.index.remove(&info);
            }
        }
    }
}
