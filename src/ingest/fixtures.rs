/// Test fixtures: representative JSON payloads from the upstream APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// USGS IV response shape (WaterML as JSON):
///   response.value.timeSeries[]
///     .sourceInfo.siteCode[0].value   — site number (string)
///     .sourceInfo.siteName
///     .sourceInfo.geoLocation.geogLocation.{latitude,longitude}
///     .variable.variableCode[0].value — parameter code (string)
///     .variable.unit.unitCode
///     .variable.noDataValue           — sentinel for missing data (-999999)
///     .values[0].value[]
///       .value    — the measurement as a STRING (not a number)
///       .dateTime — ISO 8601 with offset
///
/// NWS alerts are GeoJSON: features[].properties.{id,event,severity,...}.
/// Directions responses carry routes[].legs[].steps[] with {lat,lng} pairs.

/// Two NJ stage gauges: Millstone River at 9.12 ft (high) and Rahway
/// River at 2.31 ft (low).
pub(crate) fn fixture_nj_gauges_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Millstone River at Blackwells Mills NJ",
              "siteCode": [{ "value": "01403060", "network": "NWIS", "agencyCode": "USGS" }],
              "geoLocation": {
                "geogLocation": { "srs": "EPSG:4326", "latitude": 40.4532, "longitude": -74.5876 }
              }
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "9.12", "qualifiers": ["P"], "dateTime": "2025-09-12T10:15:00.000-04:00" }
              ],
              "qualifier": []
            }]
          },
          {
            "sourceInfo": {
              "siteName": "Rahway River near Springfield NJ",
              "siteCode": [{ "value": "01395000", "network": "NWIS", "agencyCode": "USGS" }],
              "geoLocation": {
                "geogLocation": { "srs": "EPSG:4326", "latitude": 40.6076, "longitude": -74.2846 }
              }
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "2.31", "qualifiers": ["P"], "dateTime": "2025-09-12T10:15:00.000-04:00" }
              ],
              "qualifier": []
            }]
          }
        ]
      }
    }"#
}

/// One gauge with coordinates and one without a geoLocation block.
/// The unreferenced gauge must be skipped, not fatal.
pub(crate) fn fixture_gauge_missing_coords_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Unlocated Test Gauge NJ",
              "siteCode": [{ "value": "01999999", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "4.00", "qualifiers": ["P"], "dateTime": "2025-09-12T10:15:00.000-04:00" }
              ],
              "qualifier": []
            }]
          },
          {
            "sourceInfo": {
              "siteName": "Rahway River near Springfield NJ",
              "siteCode": [{ "value": "01395000", "network": "NWIS", "agencyCode": "USGS" }],
              "geoLocation": {
                "geogLocation": { "srs": "EPSG:4326", "latitude": 40.6076, "longitude": -74.2846 }
              }
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "2.31", "qualifiers": ["P"], "dateTime": "2025-09-12T10:15:00.000-04:00" }
              ],
              "qualifier": []
            }]
          }
        ]
      }
    }"#
}

/// Single gauge reporting the USGS sentinel value -999999 — a timestamp
/// is present but the measurement is explicitly missing.
pub(crate) fn fixture_gauge_sentinel_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Passaic River at Pine Brook NJ",
              "siteCode": [{ "value": "01389500", "network": "NWIS", "agencyCode": "USGS" }],
              "geoLocation": {
                "geogLocation": { "srs": "EPSG:4326", "latitude": 40.8626, "longitude": -74.3293 }
              }
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "-999999", "qualifiers": ["P"], "dateTime": "2025-09-12T10:15:00.000-04:00" }
              ],
              "qualifier": []
            }]
          }
        ]
      }
    }"#
}

/// Two active alerts: a Severe Flash Flood Warning and a Minor Flood
/// Watch. Only the first should affect route scoring.
pub(crate) fn fixture_nws_alerts_json() -> &'static str {
    r#"{
      "features": [
        {
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.a1b2c3",
            "event": "Flash Flood Warning",
            "severity": "Severe",
            "description": "Heavy rainfall has caused flash flooding along the Hackensack River.",
            "areaDesc": "Hudson County, NJ; Bergen County, NJ",
            "expires": "2025-09-12T18:00:00-04:00"
          }
        },
        {
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.d4e5f6",
            "event": "Flood Watch",
            "severity": "Minor",
            "description": "Minor flooding possible in low-lying areas.",
            "areaDesc": "Ocean County, NJ",
            "expires": "2025-09-13T06:00:00-04:00"
          }
        }
      ]
    }"#
}

/// Alert feature missing severity and expiry. Must still parse into a
/// record with Unknown severity.
pub(crate) fn fixture_nws_alert_sparse_json() -> &'static str {
    r#"{
      "features": [
        {
          "properties": {
            "id": "urn:oid:2.49.0.1.840.0.sparse",
            "event": "Flood Watch",
            "description": "",
            "areaDesc": "Monmouth County, NJ"
          }
        }
      ]
    }"#
}

/// First forecast period mentioning heavy rain (classifies to 2.5 in).
pub(crate) fn fixture_nws_forecast_json() -> &'static str {
    r#"{
      "properties": {
        "periods": [
          {
            "number": 1,
            "name": "This Afternoon",
            "detailedForecast": "Heavy rain expected, with thunderstorms possible after 2pm. Chance of precipitation is 90%."
          },
          {
            "number": 2,
            "name": "Tonight",
            "detailedForecast": "Showers likely before midnight."
          }
        ]
      }
    }"#
}

/// One route, one leg, four steps: Hoboken down to Toms River. The second
/// leg coordinate block sits inside the Hoboken flood-prone box.
pub(crate) fn fixture_directions_json() -> &'static str {
    r#"{
      "status": "OK",
      "routes": [
        {
          "summary": "NJ-18 S",
          "legs": [
            {
              "start_location": { "lat": 40.7357, "lng": -74.0296 },
              "end_location": { "lat": 39.9537, "lng": -74.1979 },
              "steps": [
                { "start_location": { "lat": 40.7357, "lng": -74.0296 } },
                { "start_location": { "lat": 40.5018, "lng": -74.1202 } },
                { "start_location": { "lat": 40.2171, "lng": -74.1556 } },
                { "start_location": { "lat": 40.0583, "lng": -74.1710 } }
              ]
            }
          ]
        }
      ]
    }"#
}
