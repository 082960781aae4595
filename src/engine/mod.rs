//
// matched-map is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License  v3
// as published by the Free Software Foundation.
//
// matched-map is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY.
// See the GNU Lesser General Public License  for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with matched-map. If not, see http://www.gnu.org/licenses/lgpl-3.0.en.html
//
// Copyright (c)  2022 by X. Gillard
//

//! This module provides the matching engine: the label set, the working
//! state and filters of the search, the search itself and the matcher which
//! ties them all together.

mod assignment;
mod core;
mod filters;
mod labels;
mod matcher;
mod search;

pub use self::assignment::*;
pub use self::core::*;
pub use self::filters::*;
pub use self::labels::*;
pub use self::matcher::*;
pub use self::search::*;
