//! Runs the scenario catalogue under both policies and prints each
//! report in its console form.

use ::eager_gen::prelude::*;

fn main ()
{
    for report in catalogue() {
        println!("{}", report);
    }
}

fn catalogue ()
  -> Vec<Report>
{
    vec![
        counting_case::<Direct>("drains in order", 0, 10, None),
        counting_case::<Deferred>("drains in order", 0, 10, None),
        counting_case::<Direct>("fails eagerly", 0, 10, Some(0)),
        counting_case::<Deferred>("fails eagerly", 0, 10, Some(0)),
        counting_case::<Direct>("fails midway", 0, 10, Some(5)),
        counting_case::<Deferred>("fails midway", 0, 10, Some(5)),
        counting_case::<Direct>("empty range", 3, 3, None),
    ]
}
