// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact rational numbers used to report intersection parameters.

mod fraction;
mod fraction128;
mod rational128;

pub use fraction::Fraction;
pub use fraction128::Fraction128;
pub use rational128::Rational128;
