// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EPSG-coded coordinate reference system identifiers.

use std::fmt;

/// A coordinate reference system, identified by EPSG code.
///
/// This crate does not perform any reprojection mathematics; a `Crs` is an
/// identifier carried on geometry types and envelopes so that consumers
/// can tell reference systems apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs {
    code: u32,
}

impl Crs {
    /// WGS 84 geographic coordinates.
    pub const WGS84: Crs = Crs { code: 4326 };

    /// Create a CRS from a raw EPSG code.
    pub const fn epsg(code: u32) -> Self {
        Self { code }
    }

    /// The EPSG code.
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Decode an SRID string.
    ///
    /// Accepts a bare code (`"4326"`) or the authority-prefixed form
    /// (`"EPSG:4326"`). Any other input is a hard error carrying the
    /// offending string.
    pub fn decode(srid: &str) -> Result<Self, CrsParseError> {
        let trimmed = srid.trim();
        let code_part = trimmed.strip_prefix("EPSG:").unwrap_or(trimmed);
        code_part
            .parse::<u32>()
            .map(Self::epsg)
            .map_err(|_| CrsParseError {
                srid: srid.to_string(),
            })
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.code)
    }
}

/// An SRID string that could not be decoded into an EPSG code.
#[derive(Debug, Clone)]
pub struct CrsParseError {
    /// The offending SRID string, verbatim.
    pub srid: String,
}

impl fmt::Display for CrsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot decode SRID: {:?}", self.srid)
    }
}

impl std::error::Error for CrsParseError {}
