//! Host-facing battle entry points and the cross-engine report format.
//!
//! The two-line `<id> 0 0 0 <score> scores` report is an inter-process ABI
//! shared with the external `pmars`/`nmars` back-ends; downstream drivers
//! parse all three engines' output with the same code, so the format is
//! stable even though this core is usually the only engine in use.

use crate::battle::{run_battle, BattleScores};
use crate::error::BattleError;
use crate::params::BattleParameters;

/// Renders a score pair in the cross-engine report format (no trailing
/// newline).
#[must_use]
pub fn render_scores(id1: i32, id2: i32, scores: BattleScores) -> String {
    format!(
        "{id1} 0 0 0 {} scores\n{id2} 0 0 0 {} scores",
        scores.warrior1, scores.warrior2,
    )
}

/// Renders a rejected battle as the single fatal report line.
#[must_use]
pub fn render_error(error: &BattleError) -> String {
    format!("ERROR: {error}")
}

/// Runs one battle and renders the result: two score lines on success, one
/// `ERROR:` line on rejection.
#[must_use]
pub fn run_battle_report(
    warrior1: &str,
    id1: i32,
    warrior2: &str,
    id2: i32,
    params: &BattleParameters,
) -> String {
    match run_battle(warrior1, warrior2, params) {
        Ok(scores) => render_scores(id1, id2, scores),
        Err(error) => render_error(&error),
    }
}

/// C ABI wrapper. The response buffer is thread-local so parallel evolution
/// workers can run battles concurrently without cross-talk.
#[cfg(feature = "ffi")]
pub mod ffi {
    use std::cell::RefCell;
    use std::ffi::{c_char, c_int, CStr, CString};

    use crate::params::BattleParameters;

    thread_local! {
        static RESPONSE: RefCell<CString> = RefCell::new(CString::default());
    }

    fn respond(text: String) -> *const c_char {
        let text = CString::new(text.replace('\0', ""))
            .unwrap_or_else(|_| CString::default());
        RESPONSE.with(|slot| {
            *slot.borrow_mut() = text;
            slot.borrow().as_ptr()
        })
    }

    /// Runs one battle over the C ABI. Returns a NUL-terminated report that
    /// stays valid until the calling thread's next `run_battle` call.
    ///
    /// # Safety
    ///
    /// `warrior1` and `warrior2` must be null or valid NUL-terminated
    /// strings.
    #[no_mangle]
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub unsafe extern "C" fn run_battle(
        warrior1: *const c_char,
        warrior1_id: c_int,
        warrior2: *const c_char,
        warrior2_id: c_int,
        core_size: c_int,
        max_cycles: c_int,
        max_processes: c_int,
        read_limit: c_int,
        write_limit: c_int,
        min_distance: c_int,
        max_warrior_length: c_int,
        rounds: c_int,
        seed: c_int,
        strict_1988: c_int,
    ) -> *const c_char {
        if warrior1.is_null() || warrior2.is_null() {
            return respond("ERROR: null warrior source provided".into());
        }
        let (Ok(w1), Ok(w2)) = (
            unsafe { CStr::from_ptr(warrior1) }.to_str(),
            unsafe { CStr::from_ptr(warrior2) }.to_str(),
        ) else {
            return respond("ERROR: warrior source is not valid UTF-8".into());
        };

        let params = BattleParameters {
            core_size,
            max_cycles,
            max_processes: usize::try_from(max_processes).unwrap_or(0),
            read_limit,
            write_limit,
            min_distance,
            max_warrior_length: usize::try_from(max_warrior_length).unwrap_or(0),
            rounds: u32::try_from(rounds).unwrap_or(0),
            seed: (seed > 0).then(|| i64::from(seed)),
            strict_1988_mode: strict_1988 != 0,
        };

        respond(super::run_battle_report(
            w1,
            warrior1_id,
            w2,
            warrior2_id,
            &params,
        ))
    }
}
