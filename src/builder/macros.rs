//! Macros for declaring transition tables.

/// Declare a `Vec<Transition>` for table-mode machines.
///
/// Each entry is `"from" => "to"`, optionally gated with
/// `if <predicate>` where the predicate takes the current
/// [`State`](crate::State).
///
/// # Example
///
/// ```
/// use stategate::{transitions, Machine, State};
///
/// let machine = Machine::builder("lights")
///     .states([State::new("red"), State::new("green"), State::new("orange")])
///     .transitions(transitions! {
///         "red" => "green",
///         "green" => "orange",
///         "orange" => "red" if |s: &State| s.name() == "orange",
///     })
///     .build()
///     .unwrap();
/// # let _ = machine;
/// ```
#[macro_export]
macro_rules! transitions {
    ( $( $from:literal => $to:literal $( if $cond:expr )? ),* $(,)? ) => {
        ::std::vec![
            $(
                {
                    let transition = $crate::Transition::new($from, $to);
                    $( let transition = transition.when($cond); )?
                    transition
                }
            ),*
        ]
    };
}
