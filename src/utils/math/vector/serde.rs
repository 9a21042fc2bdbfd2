use num::Num;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ZeroSpVec;

impl<N> Serialize for ZeroSpVec<N>
where
    N: Num + Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // fields: len, inds, vals
        let mut state = serializer.serialize_struct("ZeroSpVec", 3)?;
        state.serialize_field("len", &(self.len as u64))?;
        state.serialize_field("inds", &self.inds)?;
        state.serialize_field("vals", &self.vals)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for ZeroSpVec<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ZeroSpVecData<N> {
            len: u64,
            inds: Vec<u32>,
            vals: Vec<N>,
        }

        let data = ZeroSpVecData::<N>::deserialize(deserializer)?;
        let len = data.len as usize;
        if data.inds.len() != data.vals.len() {
            return Err(D::Error::custom(format!(
                "inds and vals length mismatch: {} != {}",
                data.inds.len(),
                data.vals.len()
            )));
        }
        if data.inds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(D::Error::custom("inds must be strictly ascending"));
        }
        if let Some(&last) = data.inds.last() {
            if last as usize >= len {
                return Err(D::Error::custom(format!(
                    "index {last} out of range for dimension {len}"
                )));
            }
        }
        if data.vals.iter().any(|v| *v == N::zero()) {
            return Err(D::Error::custom("explicit zero stored in sparse vector"));
        }

        Ok(ZeroSpVec {
            inds: data.inds,
            vals: data.vals,
            len,
        })
    }
}
